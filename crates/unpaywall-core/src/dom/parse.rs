//! HTML loading via `scraper`

use super::{Element, Node};
use scraper::{ElementRef, Html};

impl Element {
    /// Parse a full HTML document and return its `<html>` root element
    pub fn parse_document(html: &str) -> Element {
        let document = Html::parse_document(html);
        convert(document.root_element())
    }

    /// Parse an HTML fragment into its top-level nodes
    pub fn parse_fragment(html: &str) -> Vec<Node> {
        let fragment = Html::parse_fragment(html);
        convert(fragment.root_element()).children
    }
}

fn convert(el: ElementRef<'_>) -> Element {
    let mut out = Element::new(el.value().name());

    for child in el.children() {
        match child.value() {
            scraper::Node::Text(text) => out.push(Node::Text(String::from(&**text))),
            scraper::Node::Comment(comment) => out.push(Node::Comment(String::from(&**comment))),
            scraper::Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    out.push(convert(child_el));
                }
            }
            _ => {}
        }
    }

    out
}

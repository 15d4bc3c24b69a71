//! Owned DOM model
//!
//! A small element/text tree that stands in for the host document. The
//! detector and the mutation watcher only need tag names, child order and
//! text content, so that is all this model carries.
//!
//! Trees can be built by hand or parsed from HTML with [`scraper`].

mod parse;

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element node
    Element(Element),
    /// Text node
    Text(String),
    /// Comment node (never contributes to text content)
    Comment(String),
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Get the element if this is an element node
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// An element with its child nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element; tag names are stored lowercase
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            children: Vec::new(),
        }
    }

    /// Append a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::text(text))
    }

    /// Append a child node in place
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Tag name (lowercase)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child nodes in document order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of all descendant text nodes, like DOM `textContent`
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }

    /// This element followed by all descendant elements, in document order
    pub fn elements(&self) -> Elements<'_> {
        Elements { stack: vec![self] }
    }

    /// All descendant elements in document order, excluding this one
    pub fn descendants(&self) -> Elements<'_> {
        let mut elements = self.elements();
        elements.next();
        elements
    }

    /// Descendant elements whose tag is in `tags`
    ///
    /// Like a selector query, the element itself is never a match.
    pub fn find_all<'a>(&'a self, tags: &'a [&'a str]) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |el| tags.contains(&el.name()))
    }
}

/// Pre-order iterator over a subtree's elements
pub struct Elements<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        self.stack
            .extend(el.children.iter().rev().filter_map(Node::as_element));
        Some(el)
    }
}

/// One observed DOM change: the nodes inserted by it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationRecord {
    /// Nodes added to the document, in insertion order
    pub added_nodes: Vec<Node>,
}

impl MutationRecord {
    /// Create a record from inserted nodes
    pub fn added(nodes: Vec<Node>) -> Self {
        Self { added_nodes: nodes }
    }

    /// Create a record by parsing an inserted HTML fragment
    pub fn from_html(html: &str) -> Self {
        Self::added(Element::parse_fragment(html))
    }
}

//! Mutation batch handling
//!
//! Single-page navigation streams new content into the same document.
//! Each inserted element subtree is run through the full guard chain
//! until the session has attempted a redirect.

use super::{Decision, RedirectSession, SkipReason};
use crate::dom::{MutationRecord, Node};
use tracing::trace;

impl RedirectSession {
    /// Re-run the guard chain for every element inserted by a batch
    ///
    /// Text and comment nodes are skipped. Iteration stops as soon as the
    /// session has attempted a redirect; the returned decision is the
    /// redirect if one happened, otherwise the last skip reason seen.
    pub fn process_mutations(&mut self, location: &str, records: &[MutationRecord]) -> Decision {
        if self.is_attempted() {
            return Decision::Skip(SkipReason::AlreadyAttempted);
        }

        let mut last = Decision::Skip(SkipReason::NoPaywall);

        'records: for record in records {
            for node in &record.added_nodes {
                let Node::Element(el) = node else {
                    continue;
                };

                last = self.evaluate(location, el);
                if self.is_attempted() {
                    break 'records;
                }
            }
        }

        trace!(records = records.len(), redirect = last.is_redirect(), "Mutation batch processed");
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    const STORY: &str = "https://medium.com/@u/post";

    fn marker() -> Node {
        Element::new("div")
            .with_child(Element::new("p").with_text("Member-only story"))
            .into()
    }

    #[test]
    fn test_text_nodes_skipped() {
        let mut session = RedirectSession::default();
        let batch = [MutationRecord::added(vec![Node::text("Member-only story")])];

        assert_eq!(
            session.process_mutations(STORY, &batch),
            Decision::Skip(SkipReason::NoPaywall)
        );
        assert!(!session.is_attempted());
    }

    #[test]
    fn test_redirects_on_inserted_marker() {
        let mut session = RedirectSession::default();
        let batch = [
            MutationRecord::added(vec![Element::new("span").with_text("loading").into()]),
            MutationRecord::added(vec![marker()]),
        ];

        let decision = session.process_mutations(STORY, &batch);
        assert!(decision.is_redirect());
        assert!(session.is_attempted());
    }

    #[test]
    fn test_short_circuits_after_attempt() {
        let mut session = RedirectSession::default();
        let batch = [
            MutationRecord::added(vec![marker(), marker()]),
            MutationRecord::added(vec![marker()]),
        ];

        assert!(session.process_mutations(STORY, &batch).is_redirect());
        assert_eq!(
            session.process_mutations(STORY, &batch),
            Decision::Skip(SkipReason::AlreadyAttempted)
        );
    }

    #[test]
    fn test_bare_inserted_marker_is_ignored() {
        let mut session = RedirectSession::default();
        let batch = [
            MutationRecord::from_html("<div>Member-only story</div>"),
            MutationRecord::from_html("<p>Member-only story</p>"),
        ];

        assert_eq!(
            session.process_mutations(STORY, &batch),
            Decision::Skip(SkipReason::NoPaywall)
        );
        assert!(!session.is_attempted());

        let wrapped = [MutationRecord::from_html("<div><p>Member-only story</p></div>")];
        assert_eq!(
            session.process_mutations(STORY, &wrapped).target(),
            Some("https://freedium.cfd/https://medium.com/@u/post?freedium-redirected=1")
        );
    }

    #[test]
    fn test_parsed_fragment() {
        let mut session = RedirectSession::default();
        let batch = [MutationRecord::from_html(
            "text <section><h3>Member\u{2011}only story</h3></section>",
        )];

        assert!(session.process_mutations(STORY, &batch).is_redirect());
    }
}

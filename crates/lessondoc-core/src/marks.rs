//! Mark application for text leaves
//!
//! Marks fold left to right over the raw text: each recognized mark wraps
//! the value accumulated so far, so the first mark in the list ends up
//! innermost. Unrecognized marks leave the accumulated value untouched.

use lessondoc_ast::{DocumentNode, Mark, MarkKind};

use crate::presentation::{Element, PresentationNode};

/// Class of the underline wrapper
pub const UNDERLINE_CLASS: &str = "mark-underline";

/// Render a text node's text wrapped in its marks
pub fn apply_marks(node: &DocumentNode) -> PresentationNode {
    let text = PresentationNode::text(node.text.as_deref().unwrap_or_default());
    node.marks().iter().fold(text, apply_mark)
}

fn apply_mark(inner: PresentationNode, mark: &Mark) -> PresentationNode {
    match mark.kind() {
        MarkKind::Underline => Element::new("span")
            .with_class(UNDERLINE_CLASS)
            .with_children(vec![inner])
            .into(),
        MarkKind::Unknown(_) => inner,
    }
}

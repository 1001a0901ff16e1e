//! Reference node resolution
//!
//! A `reference` node names a vocabulary record through its
//! `table_name`/`record_key` attributes and carries a `value` attribute as a
//! text fallback. Resolved references become interactive cards, unresolved
//! ones a plain emphasized label with the same visible text.

use lessondoc_ast::DocumentNode;
use serde_json::Value;
use tracing::trace;

use crate::card::{CardContent, ReferenceCard};
use crate::config::CardConfig;
use crate::hover::HoverState;
use crate::presentation::{text_content, Element, PresentationNode};
use crate::renderer::RenderContext;

/// Class of an unresolved reference label
pub const LABEL_CLASS: &str = "reference-label";

/// Attributes of a reference node, narrowed to their expected types
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTarget<'n> {
    pub table_name: Option<&'n str>,
    pub record_key: Option<&'n Value>,
    /// Text fallback, empty when absent or not a string
    pub value: &'n str,
}

impl<'n> ReferenceTarget<'n> {
    pub fn from_node(node: &'n DocumentNode) -> Self {
        Self {
            table_name: node.attr_str("table_name"),
            record_key: node.attr("record_key").filter(|key| !key.is_null()),
            value: node.attr_str("value").unwrap_or_default(),
        }
    }
}

/// Turn a reference node and its rendered children into a label or a card
pub fn resolve_reference(
    node: &DocumentNode,
    key: &str,
    children: Vec<PresentationNode>,
    context: RenderContext<'_>,
    config: &CardConfig,
) -> PresentationNode {
    let target = ReferenceTarget::from_node(node);

    let label = if children.is_empty() {
        fallback_label(target.value)
    } else {
        children
    };

    match context
        .references
        .lookup(target.table_name, target.record_key)
    {
        None => {
            trace!(
                key,
                table = target.table_name.unwrap_or_default(),
                "reference not resolved"
            );
            Element::new("span")
                .with_key(key)
                .with_class(LABEL_CLASS)
                .with_children(label)
                .into()
        }
        Some(data) => {
            let content = CardContent::from_data(
                data,
                target.table_name,
                &text_content(&label),
                config,
            );
            PresentationNode::ReferenceCard(ReferenceCard {
                key: key.to_string(),
                label,
                content,
                inline: context.within_ruby,
                state: HoverState::Closed,
            })
        }
    }
}

fn fallback_label(value: &str) -> Vec<PresentationNode> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![PresentationNode::text(value)]
    }
}

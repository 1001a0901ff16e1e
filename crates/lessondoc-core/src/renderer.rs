//! Document tree renderer
//!
//! Walks a document tree depth-first and produces an ordered presentation
//! tree. Dispatch is on [`NodeKind`]; unknown node types contribute no
//! element of their own but their children are still rendered in place.
//!
//! # Example
//!
//! ```
//! use lessondoc_ast::DocumentNode;
//! use lessondoc_core::{render, text_content, ReferenceMap, RenderContext};
//!
//! let doc = DocumentNode::new("doc").with_content(vec![
//!     DocumentNode::new("paragraph").with_content(vec![DocumentNode::text("Hello")]),
//! ]);
//!
//! let references = ReferenceMap::new();
//! let output = render(Some(&doc), RenderContext::new(&references));
//! assert_eq!(text_content(&output), "Hello");
//! ```

use lessondoc_ast::{DocumentNode, NodeKind};
use tracing::debug;

use crate::config::CardConfig;
use crate::marks::apply_marks;
use crate::presentation::{Element, PresentationNode};
use crate::reference::resolve_reference;
use crate::references::ReferenceMap;

/// Identity of the outermost rendered node
pub const ROOT_KEY: &str = "root";

/// State threaded down the walk
///
/// Passed by value: a child sees a modified copy, siblings never do.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub references: &'a ReferenceMap,
    /// Currently below a ruby node
    pub within_ruby: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(references: &'a ReferenceMap) -> Self {
        Self {
            references,
            within_ruby: false,
        }
    }

    /// Copy of this context for the children of a ruby node
    pub fn entering_ruby(self) -> Self {
        Self {
            within_ruby: true,
            ..self
        }
    }
}

/// Document tree renderer
pub struct Renderer<'c> {
    config: &'c CardConfig,
}

impl<'c> Renderer<'c> {
    /// Create a renderer using `config` for reference cards
    pub fn new(config: &'c CardConfig) -> Self {
        Self { config }
    }

    /// Render a document; an absent document renders nothing
    pub fn render(
        &self,
        node: Option<&DocumentNode>,
        context: RenderContext<'_>,
    ) -> Vec<PresentationNode> {
        self.render_with_key(node, ROOT_KEY, context)
    }

    /// Render a document under a caller-chosen root identity
    ///
    /// Use distinct roots when several documents share one output page.
    pub fn render_with_key(
        &self,
        node: Option<&DocumentNode>,
        root_key: &str,
        context: RenderContext<'_>,
    ) -> Vec<PresentationNode> {
        let mut output = Vec::new();
        if let Some(node) = node {
            self.render_node(node, root_key, context, &mut output);
        }
        output
    }

    /// Render one node, appending its output
    fn render_node(
        &self,
        node: &DocumentNode,
        key: &str,
        context: RenderContext<'_>,
        output: &mut Vec<PresentationNode>,
    ) {
        let kind = node.kind();
        let prefix = child_prefix(&kind, key);

        match kind {
            NodeKind::Doc => {
                output.extend(self.render_children(node, &prefix, context));
            }
            NodeKind::Paragraph => {
                let children = self.render_children(node, &prefix, context);
                if children.is_empty() {
                    return;
                }

                let class = match node.attr_str("textAlign").and_then(alignment_class) {
                    Some(align) => format!("{PARAGRAPH_CLASS} {align}"),
                    None => PARAGRAPH_CLASS.to_string(),
                };

                output.push(
                    Element::new("div")
                        .with_key(key)
                        .with_class(class)
                        .with_attribute("role", "paragraph")
                        .with_children(children)
                        .into(),
                );
            }
            NodeKind::BulletList => {
                let children = self.render_children(node, &prefix, context);
                output.push(
                    Element::new("ul")
                        .with_key(key)
                        .with_class("bullet-list")
                        .with_children(children)
                        .into(),
                );
            }
            NodeKind::ListItem => {
                let children = self.render_children(node, &prefix, context);
                output.push(
                    Element::new("li")
                        .with_key(key)
                        .with_class("list-item")
                        .with_children(children)
                        .into(),
                );
            }
            NodeKind::Reference => {
                let children = self.render_children(node, &prefix, context);
                output.push(resolve_reference(node, key, children, context, self.config));
            }
            NodeKind::Ruby => {
                let base = self.render_children(node, &prefix, context.entering_ruby());

                let mut parts = vec![Element::new("span")
                    .with_class("ruby-base")
                    .with_children(base)
                    .into()];

                if let Some(reading) = node.attr_str("rt").filter(|rt| !rt.is_empty()) {
                    parts.push(Element::new("rt").with_text(reading).into());
                }

                output.push(
                    Element::new("ruby")
                        .with_key(key)
                        .with_children(parts)
                        .into(),
                );
            }
            NodeKind::Text => {
                let rendered = apply_marks(node);
                if !matches!(&rendered, PresentationNode::Text { text } if text.is_empty()) {
                    output.push(rendered);
                }
            }
            NodeKind::Unknown(node_type) => {
                debug!(node_type, key, "rendering children of unknown node type");
                output.extend(self.render_children(node, &prefix, context));
            }
        }
    }

    /// Render children in order, each keyed `{prefix}-{index}`
    fn render_children(
        &self,
        node: &DocumentNode,
        prefix: &str,
        context: RenderContext<'_>,
    ) -> Vec<PresentationNode> {
        let mut output = Vec::new();
        for (index, child) in node.children().iter().enumerate() {
            self.render_node(child, &format!("{prefix}-{index}"), context, &mut output);
        }
        output
    }
}

/// Key prefix of a node's children; each child appends `-{index}`
pub(crate) fn child_prefix(kind: &NodeKind<'_>, key: &str) -> String {
    match kind {
        NodeKind::Doc | NodeKind::Text => key.to_string(),
        NodeKind::Paragraph => format!("{key}-paragraph"),
        NodeKind::BulletList => format!("{key}-bullet"),
        NodeKind::ListItem => format!("{key}-item"),
        NodeKind::Reference => format!("{key}-reference"),
        NodeKind::Ruby => format!("{key}-ruby"),
        NodeKind::Unknown(_) => format!("{key}-fallback"),
    }
}

/// Render with the default card configuration
pub fn render(node: Option<&DocumentNode>, context: RenderContext<'_>) -> Vec<PresentationNode> {
    let config = CardConfig::default();
    Renderer::new(&config).render(node, context)
}

/// Class shared by every paragraph
pub const PARAGRAPH_CLASS: &str = "paragraph";

/// Alignment styling for recognized `textAlign` values
fn alignment_class(align: &str) -> Option<&'static str> {
    match align {
        "center" => Some("text-center"),
        "right" => Some("text-right"),
        "justify" => Some("text-justify"),
        _ => None,
    }
}

//! Presentation tree
//!
//! The renderer's output: an ordered tree of display nodes, fully resolved
//! and ready to be serialized (see [`crate::html`]) or handed to another
//! front end as JSON.

use serde::Serialize;

use crate::card::ReferenceCard;

/// A display node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresentationNode {
    /// Literal text
    Text { text: String },
    /// A styled container
    Element(Element),
    /// An interactive vocabulary card
    ReferenceCard(ReferenceCard),
}

/// A styled container with ordered children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Positional identity, stable across renders of the same tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<PresentationNode>,
}

impl PresentationNode {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        PresentationNode::Text { text: text.into() }
    }

    /// Visible text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            PresentationNode::Text { text } => out.push_str(text),
            PresentationNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            PresentationNode::ReferenceCard(card) => {
                for child in &card.label {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Borrow as an element
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            PresentationNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Borrow as a reference card
    pub fn as_card(&self) -> Option<&ReferenceCard> {
        match self {
            PresentationNode::ReferenceCard(card) => Some(card),
            _ => None,
        }
    }
}

/// Concatenated visible text of a node sequence
pub fn text_content(nodes: &[PresentationNode]) -> String {
    nodes.iter().map(PresentationNode::text_content).collect()
}

impl Element {
    /// Create an empty element
    pub fn new(tag: &'static str) -> Self {
        Self {
            key: None,
            tag,
            class: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<PresentationNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(PresentationNode::text(text));
        self
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for PresentationNode {
    fn from(element: Element) -> Self {
        PresentationNode::Element(element)
    }
}

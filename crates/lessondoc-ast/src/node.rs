//! Document tree nodes
//!
//! A lesson document is a recursive tree of nodes tagged by `type`. The set
//! of types is open: editors add new node kinds over time, so a node whose
//! type is not recognized is still a valid node and keeps its children.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::lenient;
use crate::mark::Mark;

/// Node-specific configuration (alignment, ruby reading, reference target)
pub type Attrs = Map<String, Value>;

/// A single node of the document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Type discriminator (open set)
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string_or_empty"
    )]
    pub node_type: String,

    /// Text payload, present on leaf text nodes
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,

    /// Child node(s)
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Content>,

    /// Node attributes
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Attrs>,

    /// Inline marks, leaf nodes only
    #[serde(
        default,
        deserialize_with = "lenient::optional_seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub marks: Option<Vec<Mark>>,
}

/// Children of a node: stored documents hold either one node or a sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// A lone child object
    Single(Box<DocumentNode>),
    /// An ordered child sequence (possibly empty)
    Sequence(Vec<DocumentNode>),
}

/// Node types the renderer knows how to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// Document root, a transparent wrapper
    Doc,
    /// Block of inline content
    Paragraph,
    /// Unordered list
    BulletList,
    /// Item of a bullet list
    ListItem,
    /// Inline link to a vocabulary record
    Reference,
    /// Base text with a reading annotation
    Ruby,
    /// Leaf text
    Text,
    /// Any other type; children are still rendered in place
    Unknown(&'a str),
}

impl<'a> NodeKind<'a> {
    /// Classify a type discriminator
    pub fn from_type(node_type: &'a str) -> Self {
        match node_type {
            "doc" => NodeKind::Doc,
            "paragraph" => NodeKind::Paragraph,
            "bulletList" => NodeKind::BulletList,
            "listItem" => NodeKind::ListItem,
            "reference" => NodeKind::Reference,
            "ruby" => NodeKind::Ruby,
            "text" => NodeKind::Text,
            other => NodeKind::Unknown(other),
        }
    }
}

impl DocumentNode {
    /// Create a node of the given type with no payload
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    /// Create a leaf text node
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: "text".to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the children as a sequence
    pub fn with_content(mut self, children: Vec<DocumentNode>) -> Self {
        self.content = Some(Content::Sequence(children));
        self
    }

    /// Set a single child
    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.content = Some(Content::Single(Box::new(child)));
        self
    }

    /// Set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(name.into(), value.into());
        self
    }

    /// Append a mark
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.get_or_insert_with(Vec::new).push(mark);
        self
    }

    /// Classify this node's type
    pub fn kind(&self) -> NodeKind<'_> {
        NodeKind::from_type(&self.node_type)
    }

    /// Children as an ordered slice; absent content is an empty slice
    pub fn children(&self) -> &[DocumentNode] {
        match &self.content {
            None => &[],
            Some(Content::Single(child)) => std::slice::from_ref(child.as_ref()),
            Some(Content::Sequence(children)) => children,
        }
    }

    /// Marks in application order
    pub fn marks(&self) -> &[Mark] {
        self.marks.as_deref().unwrap_or(&[])
    }

    /// Get a raw attribute value
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(name)
    }

    /// Get an attribute only if it holds a string
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name)?.as_str()
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(Content::Sequence(lenient::collect_valid(items))),
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(|node| Content::Single(Box::new(node)))
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a node or a node sequence, found {other}"
            ))),
        }
    }
}

//! Inline marks attached to text nodes

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::node::Attrs;

/// An inline styling annotation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mark {
    /// Mark type discriminator (open set)
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string_or_empty"
    )]
    pub mark_type: String,

    /// Mark attributes
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Attrs>,
}

/// Mark types with a presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind<'a> {
    Underline,
    /// Anything else passes text through untouched
    Unknown(&'a str),
}

impl Mark {
    /// Create a mark of the given type
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            attrs: None,
        }
    }

    /// Classify this mark's type
    pub fn kind(&self) -> MarkKind<'_> {
        match self.mark_type.as_str() {
            "underline" => MarkKind::Underline,
            other => MarkKind::Unknown(other),
        }
    }
}

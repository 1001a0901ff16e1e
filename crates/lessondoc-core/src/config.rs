//! Render configuration
//!
//! Settings are loaded from `lessondoc.toml` next to the lesson file:
//!
//! ```toml
//! [card]
//! heading_fields = ["Word", "Name", "English", "Meaning"]
//! reading_fields = ["Furigana", "Kana"]
//! max_extra_fields = 4
//!
//! [html]
//! container_class = "lesson-content"
//! standalone = true
//!
//! [vocabulary]
//! title = "Vocabulary"
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// Reference card field selection
    pub card: CardConfig,
    /// HTML output settings
    pub html: HtmlConfig,
    /// Vocabulary sidebar settings
    pub vocabulary: VocabularyConfig,
}

impl RenderConfig {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

/// Which record fields feed each line of a reference card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Heading candidates, highest priority first
    pub heading_fields: Vec<String>,
    /// Reading line candidates, highest priority first
    pub reading_fields: Vec<String>,
    /// Meaning line candidates, highest priority first
    pub meaning_fields: Vec<String>,
    /// Bookkeeping fields never shown
    pub ignored_fields: Vec<String>,
    /// Maximum number of additional key/value lines
    pub max_extra_fields: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            heading_fields: strings(&["Word", "Name", "English", "Meaning"]),
            reading_fields: strings(&["Furigana", "Kana"]),
            meaning_fields: strings(&["Meaning", "English"]),
            ignored_fields: default_ignored_fields(),
            max_extra_fields: 4,
        }
    }
}

impl CardConfig {
    /// Check whether a field is consumed by the heading, reading or meaning line
    pub fn is_primary_field(&self, name: &str) -> bool {
        self.heading_fields
            .iter()
            .chain(&self.reading_fields)
            .chain(&self.meaning_fields)
            .any(|field| field == name)
    }

    /// Check whether a field is bookkeeping
    pub fn is_ignored_field(&self, name: &str) -> bool {
        self.ignored_fields.iter().any(|field| field == name)
    }
}

/// HTML output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Class of the element wrapping a rendered document
    pub container_class: String,
    /// Text shown in place of an absent document
    pub empty_placeholder: Option<String>,
    /// Emit a complete page with a stylesheet instead of a fragment
    pub standalone: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            container_class: "lesson-content".to_string(),
            empty_placeholder: None,
            standalone: false,
        }
    }
}

/// Vocabulary sidebar settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Section heading
    pub title: String,
    /// Shown when no entry carries data
    pub empty_message: String,
    /// Text of the practice link
    pub practice_label: String,
    /// Fields never shown on a vocabulary card
    pub ignored_fields: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            title: "Vocabulary".to_string(),
            empty_message: "No vocabulary available yet.".to_string(),
            practice_label: "Practice".to_string(),
            ignored_fields: default_ignored_fields(),
        }
    }
}

fn default_ignored_fields() -> Vec<String> {
    strings(&["id", "rowid", "created_at", "modified_at", "table", "key"])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

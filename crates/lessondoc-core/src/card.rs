//! Interactive reference cards
//!
//! A resolved reference renders as a trigger showing the reference label and
//! a popover summarizing the vocabulary record behind it.

use serde::Serialize;
use serde_json::Value;

use crate::config::CardConfig;
use crate::hover::{HoverEvent, HoverState};
use crate::presentation::PresentationNode;
use crate::references::FieldData;

/// A vocabulary card attached to an inline label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCard {
    /// Positional identity of the reference node
    pub key: String,
    /// Trigger content
    pub label: Vec<PresentationNode>,
    /// Popover content
    pub content: CardContent,
    /// Rendered inside a ruby annotation
    pub inline: bool,
    pub state: HoverState,
}

/// Lines of a card popover
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CardContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CardField>,
    /// Originating table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// An additional key/value line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardField {
    /// Display name (underscores replaced by spaces)
    pub name: String,
    pub value: String,
}

impl ReferenceCard {
    /// Feed an interaction event to the card
    pub fn handle(&mut self, event: HoverEvent) {
        self.state = self.state.transition(event);
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Id shared by the trigger's `aria-describedby` and the popover
    pub fn popover_id(&self) -> String {
        format!("{}-card", self.key)
    }
}

impl CardContent {
    /// Summarize a record
    ///
    /// `label` is the visible text of the reference, used as the heading when
    /// the record has no heading field.
    pub fn from_data(
        data: &FieldData,
        table_name: Option<&str>,
        label: &str,
        config: &CardConfig,
    ) -> Self {
        let heading = first_string(data, &config.heading_fields)
            .or_else(|| (!label.is_empty()).then(|| label.to_string()));

        let details = data
            .iter()
            .filter(|(name, _)| !config.is_ignored_field(name) && !config.is_primary_field(name))
            .filter_map(|(name, value)| {
                non_blank(value).map(|value| CardField {
                    name: name.replace('_', " "),
                    value: value.to_string(),
                })
            })
            .take(config.max_extra_fields)
            .collect();

        Self {
            heading,
            reading: first_string(data, &config.reading_fields),
            meaning: first_string(data, &config.meaning_fields),
            details,
            source: table_name
                .filter(|table| !table.is_empty())
                .map(str::to_string),
        }
    }
}

/// First field in priority order holding a non-blank string
fn first_string(data: &FieldData, fields: &[String]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| data.get(field).and_then(non_blank))
        .map(str::to_string)
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.trim().is_empty())
}

//! Vocabulary sidebar
//!
//! Lists every vocabulary entry of a lesson as a summary card. Unlike the
//! reference popover, fields are classified by name pattern rather than by
//! a fixed priority list.

use std::sync::OnceLock;

use lessondoc_ast::VocabularyEntry;
use regex::Regex;
use serde::Serialize;

use crate::config::VocabularyConfig;
use crate::presentation::{Element, PresentationNode};

/// Summary of one vocabulary entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyCard {
    pub heading: String,
    pub readings: Vec<String>,
    pub descriptions: Vec<String>,
    /// Remaining fields as (label, value)
    pub extra: Vec<(String, String)>,
    pub source: Option<String>,
}

impl VocabularyCard {
    /// Summarize an entry; entries without data have no card
    pub fn from_entry(entry: &VocabularyEntry, config: &VocabularyConfig) -> Option<Self> {
        let data = entry.data.as_ref()?;

        let mut fields = data
            .iter()
            .filter(|(name, _)| !config.ignored_fields.iter().any(|ignored| ignored == *name))
            .filter_map(|(name, value)| {
                let value = value.as_str()?.trim();
                (!value.is_empty()).then(|| (name.as_str(), value))
            });

        let heading = fields
            .next()
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| "Untitled".to_string());

        let mut card = Self {
            heading,
            readings: Vec::new(),
            descriptions: Vec::new(),
            extra: Vec::new(),
            source: entry.table().map(str::to_string),
        };

        for (name, value) in fields {
            if reading_pattern().is_match(name) {
                card.readings.push(value.to_string());
            } else if description_pattern().is_match(name) {
                card.descriptions.push(value.to_string());
            } else {
                card.extra.push((normalize_label(name), value.to_string()));
            }
        }

        Some(card)
    }

    /// Presentation of this card
    pub fn to_node(&self) -> PresentationNode {
        let mut children = vec![Element::new("p")
            .with_class("vocab-heading")
            .with_text(&self.heading)
            .into()];

        if !self.readings.is_empty() {
            children.push(
                Element::new("p")
                    .with_class("vocab-readings")
                    .with_text(self.readings.join(" • "))
                    .into(),
            );
        }

        for description in &self.descriptions {
            children.push(
                Element::new("p")
                    .with_class("vocab-description")
                    .with_text(description)
                    .into(),
            );
        }

        if !self.extra.is_empty() {
            let rows = self
                .extra
                .iter()
                .map(|(label, value)| {
                    Element::new("div")
                        .with_children(vec![
                            Element::new("dt").with_text(label).into(),
                            Element::new("dd").with_text(value).into(),
                        ])
                        .into()
                })
                .collect();
            children.push(
                Element::new("dl")
                    .with_class("vocab-fields")
                    .with_children(rows)
                    .into(),
            );
        }

        if let Some(ref source) = self.source {
            children.push(
                Element::new("p")
                    .with_class("vocab-source")
                    .with_text(format!("Source: {}", source))
                    .into(),
            );
        }

        Element::new("div")
            .with_class("vocab-card")
            .with_children(children)
            .into()
    }
}

/// Render the vocabulary section of a lesson
///
/// Entries without data are not listed or counted.
pub fn vocabulary_section(
    entries: &[VocabularyEntry],
    practice_href: Option<&str>,
    config: &VocabularyConfig,
) -> PresentationNode {
    let cards: Vec<(usize, VocabularyCard)> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            VocabularyCard::from_entry(entry, config).map(|card| (index, card))
        })
        .collect();

    let mut header = vec![Element::new("h2").with_text(&config.title).into()];
    if let Some(href) = practice_href {
        header.push(
            Element::new("a")
                .with_class("vocab-practice")
                .with_attribute("href", href)
                .with_text(&config.practice_label)
                .into(),
        );
    }
    header.push(
        Element::new("p")
            .with_class("vocab-count")
            .with_text(item_count(cards.len()))
            .into(),
    );

    let body: PresentationNode = if cards.is_empty() {
        Element::new("p")
            .with_class("vocab-empty")
            .with_text(&config.empty_message)
            .into()
    } else {
        let items = cards
            .iter()
            .map(|(index, card)| {
                Element::new("li")
                    .with_key(entry_key(&entries[*index], *index))
                    .with_children(vec![card.to_node()])
                    .into()
            })
            .collect();
        Element::new("ul")
            .with_class("vocab-list")
            .with_children(items)
            .into()
    };

    let mut children = header;
    children.push(body);

    Element::new("section")
        .with_class("vocabulary")
        .with_children(children)
        .into()
}

/// "1 item", "3 items"
fn item_count(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

/// Identity of a listed entry: its record key, else its position
fn entry_key(entry: &VocabularyEntry, index: usize) -> String {
    entry
        .key()
        .and_then(crate::references::normalize_key)
        .unwrap_or_else(|| index.to_string())
}

/// Underscores to spaces, trimmed, each word capitalized
fn normalize_label(label: &str) -> String {
    static WORD_START: OnceLock<Regex> = OnceLock::new();
    let re = WORD_START.get_or_init(|| Regex::new(r"\b\w").unwrap());

    let spaced = label.replace('_', " ");
    re.replace_all(spaced.trim(), |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

fn reading_pattern() -> &'static Regex {
    static READING_RE: OnceLock<Regex> = OnceLock::new();
    READING_RE.get_or_init(|| Regex::new(r"(?i)furigana|reading|kana|pronunciation").unwrap())
}

fn description_pattern() -> &'static Regex {
    static DESCRIPTION_RE: OnceLock<Regex> = OnceLock::new();
    DESCRIPTION_RE
        .get_or_init(|| Regex::new(r"(?i)meaning|definition|translation|gloss|notes?").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlGenerator;
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<VocabularyEntry> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_card_classification() {
        let list = entries(json!([{
            "ref": {"table": "Words", "key": 3},
            "data": {
                "id": "3",
                "Word": " 猫 ",
                "Furigana": "ねこ",
                "romaji_reading": "neko",
                "Meaning": "cat",
                "Notes": "common pet",
                "part_of_speech": "noun",
                "level": 5
            }
        }]));
        let card = VocabularyCard::from_entry(&list[0], &VocabularyConfig::default()).unwrap();

        assert_eq!(card.heading, "猫");
        assert_eq!(card.readings, vec!["ねこ", "neko"]);
        assert_eq!(card.descriptions, vec!["cat", "common pet"]);
        assert_eq!(
            card.extra,
            vec![("Part Of Speech".to_string(), "noun".to_string())]
        );
        assert_eq!(card.source.as_deref(), Some("Words"));
    }

    #[test]
    fn test_untitled_card() {
        let list = entries(json!([{"data": {"id": "1", "count": 2}}]));
        let card = VocabularyCard::from_entry(&list[0], &VocabularyConfig::default()).unwrap();
        assert_eq!(card.heading, "Untitled");
        assert!(card.source.is_none());
    }

    #[test]
    fn test_entry_without_data_has_no_card() {
        let list = entries(json!([{"ref": {"table": "Words", "key": 1}}]));
        assert!(VocabularyCard::from_entry(&list[0], &VocabularyConfig::default()).is_none());
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("part_of_speech"), "Part Of Speech");
        assert_eq!(normalize_label("_jlpt_level_"), "Jlpt Level");
        assert_eq!(normalize_label("Example"), "Example");
    }

    #[test]
    fn test_section_counts_only_entries_with_data() {
        let list = entries(json!([
            {"ref": {"table": "Words", "key": 1}, "data": {"Word": "猫"}},
            {"ref": {"table": "Words", "key": 2}}
        ]));
        let section = vocabulary_section(&list, None, &VocabularyConfig::default());
        let html = HtmlGenerator::new().generate(&[section]);

        assert!(html.contains("<h2>Vocabulary</h2>"));
        assert!(html.contains("<p class=\"vocab-count\">1 item</p>"));
        assert!(html.contains("<p class=\"vocab-heading\">猫</p>"));
        assert!(!html.contains("vocab-practice"));
    }

    #[test]
    fn test_empty_section() {
        let section = vocabulary_section(&[], Some("/practice"), &VocabularyConfig::default());
        let html = HtmlGenerator::new().generate(&[section]);

        assert!(html.contains("0 items"));
        assert!(html.contains("No vocabulary available yet."));
        assert!(html.contains("<a class=\"vocab-practice\" href=\"/practice\">Practice</a>"));
    }

    #[test]
    fn test_list_item_keys() {
        let list = entries(json!([
            {"ref": {"table": "Words", "key": 7}, "data": {"Word": "a"}},
            {"data": {"Word": "b"}}
        ]));
        let section = vocabulary_section(&list, None, &VocabularyConfig::default());
        let list_element = section
            .as_element()
            .unwrap()
            .children
            .last()
            .unwrap()
            .as_element()
            .unwrap();

        let keys: Vec<_> = list_element
            .children
            .iter()
            .map(|item| item.as_element().unwrap().key.clone().unwrap())
            .collect();
        assert_eq!(keys, vec!["7", "1"]);
    }
}

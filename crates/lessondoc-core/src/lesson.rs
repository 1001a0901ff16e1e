//! Lesson files
//!
//! A lesson file holds ordered sections, each with its own document tree,
//! plus the vocabulary entries those trees reference. All sections of a
//! lesson share one reference map.

use std::fs;
use std::path::Path;

use lessondoc_ast::{lenient, DocumentNode, VocabularyEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::presentation::{Element, PresentationNode};
use crate::references::ReferenceMap;
use crate::renderer::{RenderContext, Renderer};
use crate::vocabulary::vocabulary_section;

/// Section type rendered as a document tree
pub const RICH_SECTION: &str = "rich";

/// A lesson as stored on disk
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonFile {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub content: LessonContent,
    #[serde(deserialize_with = "lenient::seq_or_empty")]
    pub vocabulary: Vec<VocabularyEntry>,
}

/// Section container of a lesson
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonContent {
    #[serde(deserialize_with = "lenient::seq_or_empty")]
    pub sections: Vec<LessonSection>,
}

/// One section of a lesson
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonSection {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub section_type: Option<String>,
    #[serde(deserialize_with = "lenient::optional")]
    pub order_index: Option<f64>,
    #[serde(deserialize_with = "lenient::optional")]
    pub content: Option<DocumentNode>,
}

impl LessonFile {
    /// Parse a lesson from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a lesson file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Sections sorted by `order_index` (missing counts as 0, ties keep file order)
    pub fn ordered_sections(&self) -> Vec<&LessonSection> {
        let mut sections: Vec<_> = self.content.sections.iter().collect();
        sections.sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));
        sections
    }

    /// Index this lesson's vocabulary
    pub fn reference_map(&self) -> ReferenceMap {
        ReferenceMap::from_entries(&self.vocabulary)
    }
}

impl LessonSection {
    fn sort_order(&self) -> f64 {
        self.order_index.unwrap_or(0.0)
    }

    /// Whether this section holds a document tree
    pub fn is_rich(&self) -> bool {
        self.section_type.as_deref() == Some(RICH_SECTION)
    }

    /// Display title
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Section")
    }
}

/// Heading context shown above a lesson
#[derive(Debug, Clone, Default)]
pub struct LessonHeader<'a> {
    /// Course name
    pub course: Option<&'a str>,
    /// Section and unit, e.g. "Basics • Unit 1"
    pub location: Option<&'a str>,
    /// Link target of the vocabulary practice button
    pub practice_href: Option<&'a str>,
}

/// Render a whole lesson: header, rich sections and vocabulary sidebar
pub fn render_lesson(
    lesson: &LessonFile,
    header: &LessonHeader<'_>,
    config: &RenderConfig,
) -> Vec<PresentationNode> {
    let references = lesson.reference_map();
    let renderer = Renderer::new(&config.card);
    let context = RenderContext::new(&references);

    let mut article = vec![lesson_header(lesson, header)];

    let sections = lesson.ordered_sections();
    if sections.is_empty() {
        article.push(
            Element::new("p")
                .with_class("lesson-empty")
                .with_text("No lesson content available yet.")
                .into(),
        );
    }

    for (index, section) in sections.into_iter().enumerate() {
        if !section.is_rich() {
            debug!(
                index,
                section_type = section.section_type.as_deref().unwrap_or_default(),
                "skipping non-rich section"
            );
            continue;
        }

        let key = section_key(section, index);
        let body = renderer.render_with_key(section.content.as_ref(), &key, context);

        article.push(
            Element::new("section")
                .with_key(key)
                .with_class("lesson-section")
                .with_children(vec![
                    Element::new("h2").with_text(section.display_title()).into(),
                    Element::new("div")
                        .with_class(config.html.container_class.clone())
                        .with_children(body)
                        .into(),
                ])
                .into(),
        );
    }

    vec![
        Element::new("article")
            .with_class("lesson")
            .with_children(article)
            .into(),
        Element::new("aside")
            .with_class("lesson-aside")
            .with_children(vec![vocabulary_section(
                &lesson.vocabulary,
                header.practice_href,
                &config.vocabulary,
            )])
            .into(),
    ]
}

fn lesson_header(lesson: &LessonFile, header: &LessonHeader<'_>) -> PresentationNode {
    let mut children = Vec::new();
    if let Some(course) = header.course {
        children.push(
            Element::new("p")
                .with_class("lesson-course")
                .with_text(course)
                .into(),
        );
    }

    let title = lesson
        .title
        .as_deref()
        .or(lesson.id.as_deref())
        .unwrap_or("Untitled Lesson");
    children.push(Element::new("h1").with_text(title).into());

    if let Some(location) = header.location.filter(|location| !location.is_empty()) {
        children.push(
            Element::new("p")
                .with_class("lesson-location")
                .with_text(location)
                .into(),
        );
    }

    Element::new("header").with_children(children).into()
}

/// Root identity of a section's document: its id, else its position
pub(crate) fn section_key(section: &LessonSection, index: usize) -> String {
    match section.id.as_deref() {
        Some(id) if !id.is_empty() => format!("section-{}", id),
        _ => format!("section-{}", index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlGenerator;
    use crate::presentation::text_content;
    use serde_json::json;

    fn sample_lesson() -> LessonFile {
        LessonFile::from_json_str(
            &json!({
                "id": "l1",
                "title": "Greetings",
                "content": {"sections": [
                    {"id": "b", "title": "Second", "type": "rich", "order_index": 2,
                     "content": {"type": "doc", "content": [
                         {"type": "paragraph", "content": [{"type": "text", "text": "two"}]}
                     ]}},
                    {"id": "q", "title": "Quiz", "type": "quiz", "order_index": 0},
                    {"id": "a", "title": "First", "type": "rich", "order_index": 1,
                     "content": {"type": "doc", "content": [
                         {"type": "paragraph", "content": [
                             {"type": "reference", "attrs": {"table_name": "Words", "record_key": 1, "value": "neko"}}
                         ]}
                     ]}}
                ]},
                "vocabulary": [
                    {"ref": {"table": "Words", "key": 1}, "data": {"Word": "猫", "Meaning": "cat"}}
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_ordered_sections() {
        let lesson = sample_lesson();
        let ids: Vec<_> = lesson
            .ordered_sections()
            .iter()
            .filter_map(|s| s.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["q", "a", "b"]);
    }

    #[test]
    fn test_missing_order_index_sorts_as_zero() {
        let lesson = LessonFile::from_json_str(
            r#"{"content": {"sections": [
                {"id": "x", "order_index": 1},
                {"id": "y"},
                {"id": "z", "order_index": -1},
                {"id": "w", "order_index": "first", "content": "not a tree"}
            ]}}"#,
        )
        .unwrap();
        let ids: Vec<_> = lesson
            .ordered_sections()
            .iter()
            .filter_map(|s| s.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["z", "y", "w", "x"]);
        assert!(lesson.content.sections[3].content.is_none());
    }

    #[test]
    fn test_render_lesson() {
        let lesson = sample_lesson();
        let header = LessonHeader {
            course: Some("Japanese"),
            location: Some("Basics • Unit 1"),
            practice_href: Some("/courses/jp/lessons/l1/practice"),
        };
        let output = render_lesson(&lesson, &header, &RenderConfig::default());
        let html = HtmlGenerator::new().generate(&output);

        assert!(html.contains("<h1>Greetings</h1>"));
        assert!(html.contains("<p class=\"lesson-location\">Basics • Unit 1</p>"));
        let first = html.find("<h2>First</h2>").unwrap();
        let second = html.find("<h2>Second</h2>").unwrap();
        assert!(first < second);
        assert!(!html.contains("Quiz"));
        assert!(html.contains("id=\"section-a-0-paragraph-0-card\""));
        assert!(html.contains("1 item"));
        assert!(html.contains("href=\"/courses/jp/lessons/l1/practice\""));
    }

    #[test]
    fn test_empty_lesson() {
        let lesson = LessonFile::from_json_str("{}").unwrap();
        let output = render_lesson(&lesson, &LessonHeader::default(), &RenderConfig::default());
        let text = text_content(&output);
        assert!(text.contains("Untitled Lesson"));
        assert!(text.contains("No lesson content available yet."));
        assert!(text.contains("No vocabulary available yet."));
    }

    #[test]
    fn test_null_collections_load_empty() {
        for json in [
            r#"{"vocabulary": null}"#,
            r#"{"content": null}"#,
            r#"{"content": {"sections": null}}"#,
            r#"{"content": "nonsense", "vocabulary": {"a": 1}}"#,
        ] {
            let lesson = LessonFile::from_json_str(json).unwrap();
            assert!(lesson.content.sections.is_empty(), "{}", json);
            assert!(lesson.vocabulary.is_empty(), "{}", json);
        }
    }

    #[test]
    fn test_malformed_vocabulary_entry_is_dropped() {
        let lesson = LessonFile::from_json_str(
            &json!({
                "content": {"sections": [
                    7,
                    {"id": "a", "type": "rich", "content": {"type": "doc", "content": [
                        {"type": "paragraph", "content": [
                            {"type": "reference", "attrs": {"table_name": "Words", "record_key": 1, "value": "neko"}}
                        ]}
                    ]}}
                ]},
                "vocabulary": [
                    "x",
                    {"ref": {"table": "Words", "key": 1}, "data": {"Word": "猫"}}
                ]
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(lesson.content.sections.len(), 1);
        assert_eq!(lesson.vocabulary.len(), 1);
        assert_eq!(lesson.reference_map().len(), 1);

        let output = render_lesson(&lesson, &LessonHeader::default(), &RenderConfig::default());
        let html = HtmlGenerator::new().generate(&output);
        assert!(html.contains("class=\"reference-card\""));
    }

    #[test]
    fn test_invalid_json() {
        assert!(LessonFile::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.json");
        fs::write(&path, r#"{"title": "On disk"}"#).unwrap();

        let lesson = LessonFile::load(&path).unwrap();
        assert_eq!(lesson.title.as_deref(), Some("On disk"));
        assert!(LessonFile::load(&dir.path().join("missing.json")).is_err());
    }
}

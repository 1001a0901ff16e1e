//! lessondoc-core - Lesson documents with living vocabulary
//!
//! Core library for lessondoc, rendering rich-text lesson trees into a
//! presentation tree and HTML, with inline references resolved against the
//! lesson's vocabulary.
//!
//! # Example
//!
//! ```
//! use lessondoc_ast::{DocumentNode, VocabularyEntry};
//! use lessondoc_core::{build_reference_map, render, text_content, RenderContext};
//! use serde_json::json;
//!
//! let entries: Vec<VocabularyEntry> = serde_json::from_value(json!([
//!     {"ref": {"table": "Words", "key": 1}, "data": {"Word": "猫", "Meaning": "cat"}}
//! ]))
//! .unwrap();
//!
//! let doc = DocumentNode::new("doc").with_content(vec![
//!     DocumentNode::new("paragraph").with_content(vec![
//!         DocumentNode::text("A "),
//!         DocumentNode::new("reference")
//!             .with_attr("table_name", "Words")
//!             .with_attr("record_key", 1)
//!             .with_attr("value", "neko"),
//!     ]),
//! ]);
//!
//! let references = build_reference_map(&entries);
//! let output = render(Some(&doc), RenderContext::new(&references));
//! assert_eq!(text_content(&output), "A neko");
//! ```

pub mod card;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hover;
pub mod html;
pub mod inspect;
pub mod lesson;
pub mod manifest;
pub mod marks;
pub mod presentation;
pub mod reference;
pub mod references;
pub mod renderer;
pub mod vocabulary;

// Re-export main types and functions
pub use card::{CardContent, CardField, ReferenceCard};
pub use config::{CardConfig, HtmlConfig, RenderConfig, VocabularyConfig};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{LessonError, Result};
pub use hover::{HoverEvent, HoverState};
pub use html::{escape_html, generate_page, render_document_html, HtmlGenerator};
pub use inspect::{inspect_document, inspect_lesson, inspect_vocabulary};
pub use lesson::{render_lesson, LessonFile, LessonHeader, LessonSection};
pub use manifest::{
    display_unit_title, lesson_href, practice_href, CourseManifest, Lesson, LessonDescriptor,
};
pub use marks::apply_marks;
pub use presentation::{text_content, Element, PresentationNode};
pub use reference::resolve_reference;
pub use references::{build_reference_map, normalize_key, ReferenceMap};
pub use renderer::{render, RenderContext, Renderer};
pub use vocabulary::{vocabulary_section, VocabularyCard};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

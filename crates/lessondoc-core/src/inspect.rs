//! Document inspection
//!
//! Walks a document tree the way the renderer does, without producing
//! output, and reports what the renderer will pass through or degrade.
//! Node paths are the positional keys the renderer assigns.

use lessondoc_ast::{DocumentNode, MarkKind, NodeKind, VocabularyEntry};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::lesson::{section_key, LessonFile};
use crate::reference::ReferenceTarget;
use crate::references::{normalize_key, ReferenceMap};
use crate::renderer::{child_prefix, ROOT_KEY};

/// Unknown node type, children rendered in place
pub const UNKNOWN_NODE: &str = "L001";
/// Unknown mark type, text passed through
pub const UNKNOWN_MARK: &str = "L002";
/// Reference without a table name or usable record key
pub const INCOMPLETE_REFERENCE: &str = "L003";
/// Reference naming a record that is not in the vocabulary
pub const UNRESOLVED_REFERENCE: &str = "L004";
/// Vocabulary entry left out of the reference map
pub const DROPPED_ENTRY: &str = "L005";

/// Inspect a document tree against a reference map
pub fn inspect_document(node: Option<&DocumentNode>, references: &ReferenceMap) -> Diagnostics {
    inspect_document_with_key(node, ROOT_KEY, references)
}

/// Inspect a document tree rendered under `root_key`
pub fn inspect_document_with_key(
    node: Option<&DocumentNode>,
    root_key: &str,
    references: &ReferenceMap,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    if let Some(node) = node {
        inspect_node(node, root_key, references, &mut diagnostics);
    }
    diagnostics
}

/// Inspect a whole lesson: its vocabulary, then each rich section in order
///
/// Paths match the keys [`crate::lesson::render_lesson`] assigns.
pub fn inspect_lesson(lesson: &LessonFile) -> Diagnostics {
    let references = lesson.reference_map();
    let mut diagnostics = inspect_vocabulary(&lesson.vocabulary);

    for (index, section) in lesson.ordered_sections().into_iter().enumerate() {
        if section.is_rich() {
            let key = section_key(section, index);
            diagnostics.extend(inspect_document_with_key(
                section.content.as_ref(),
                &key,
                &references,
            ));
        }
    }

    diagnostics
}

/// Inspect vocabulary entries for records the reference map will skip
pub fn inspect_vocabulary(entries: &[VocabularyEntry]) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    for (index, entry) in entries.iter().enumerate() {
        let mut missing = Vec::new();
        if entry.table().map_or(true, str::is_empty) {
            missing.push("table");
        }
        if entry.key().and_then(normalize_key).is_none() {
            missing.push("key");
        }
        if entry.data.is_none() {
            missing.push("data");
        }

        if !missing.is_empty() {
            diagnostics.push(
                Diagnostic::warning("Vocabulary entry cannot be referenced")
                    .with_code(DROPPED_ENTRY)
                    .with_path(format!("vocabulary-{}", index))
                    .with_note(format!("missing: {}", missing.join(", "))),
            );
        }
    }

    diagnostics
}

fn inspect_node(
    node: &DocumentNode,
    key: &str,
    references: &ReferenceMap,
    diagnostics: &mut Diagnostics,
) {
    let kind = node.kind();

    match kind {
        NodeKind::Unknown(node_type) => {
            diagnostics.push(
                Diagnostic::info(format!("Unknown node type '{}'", node_type))
                    .with_code(UNKNOWN_NODE)
                    .with_path(key)
                    .with_help("Only the children of this node are rendered"),
            );
        }
        NodeKind::Text => {
            for mark in node.marks() {
                if let MarkKind::Unknown(mark_type) = mark.kind() {
                    diagnostics.push(
                        Diagnostic::info(format!("Unknown mark type '{}'", mark_type))
                            .with_code(UNKNOWN_MARK)
                            .with_path(key)
                            .with_help("The text is rendered without this mark"),
                    );
                }
            }
        }
        NodeKind::Reference => inspect_reference(node, key, references, diagnostics),
        _ => {}
    }

    let prefix = child_prefix(&kind, key);
    for (index, child) in node.children().iter().enumerate() {
        inspect_node(child, &format!("{prefix}-{index}"), references, diagnostics);
    }
}

fn inspect_reference(
    node: &DocumentNode,
    key: &str,
    references: &ReferenceMap,
    diagnostics: &mut Diagnostics,
) {
    let target = ReferenceTarget::from_node(node);
    let table = target.table_name.filter(|table| !table.is_empty());
    let record_key = target.record_key.and_then(normalize_key);

    let (table, record_key) = match (table, record_key) {
        (Some(table), Some(record_key)) => (table, record_key),
        (table, record_key) => {
            let mut missing = Vec::new();
            if table.is_none() {
                missing.push("table_name");
            }
            if record_key.is_none() {
                missing.push("record_key");
            }
            diagnostics.push(
                Diagnostic::warning("Reference is rendered as a plain label")
                    .with_code(INCOMPLETE_REFERENCE)
                    .with_path(key)
                    .with_note(format!("missing: {}", missing.join(", "))),
            );
            return;
        }
    };

    if references.get(table, &record_key).is_none() {
        let help = if references.contains_table(table) {
            format!("No record '{}' in table '{}'", record_key, table)
        } else {
            format!("No vocabulary entries for table '{}'", table)
        };
        diagnostics.push(
            Diagnostic::warning("Unresolved reference is rendered as a plain label")
                .with_code(UNRESOLVED_REFERENCE)
                .with_path(key)
                .with_help(help),
        );
    }
}

//! lessondoc-ast - Document tree definitions
//!
//! This crate provides the types used by lessondoc for representing
//! stored lesson documents (a JSON rich-text tree) and the vocabulary
//! entries their reference nodes point at.

pub mod lenient;
pub mod mark;
pub mod node;
pub mod vocabulary;

pub use mark::{Mark, MarkKind};
pub use node::{Attrs, Content, DocumentNode, NodeKind};
pub use vocabulary::{EntryRef, VocabularyEntry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

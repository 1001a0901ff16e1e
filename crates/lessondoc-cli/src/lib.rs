//! lessondoc CLI - Command-line interface library
//!
//! This library provides the CLI functionality for lessondoc, including:
//! - Render: Convert a lesson file to HTML
//! - Check: Report content the renderer degrades
//! - Lessons: List the lessons of a course manifest
//!
//! # Library Usage
//!
//! ```ignore
//! use lessondoc_cli::{check_report, render_command, CourseOptions, OutputFormat};
//!
//! let written = render_command(&input, None, None, true, &CourseOptions::default())?;
//! let report = check_report(&input, OutputFormat::Json)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Render a lesson to a standalone page
//! lessondoc render lesson.json --output lesson.html --standalone
//!
//! # Render with course name, location and practice link
//! lessondoc render lesson.json --manifest manifest.json --slug japanese
//!
//! # Check a lesson for unresolved references
//! lessondoc check lesson.json --format json
//!
//! # List lessons with their links
//! lessondoc lessons manifest.json --slug japanese
//!
//! # Trace reference resolution
//! RUST_LOG=trace lessondoc render lesson.json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    check_command, check_report, lessons_command, lessons_report, render_command, run_cli,
    CourseOptions, OutputFormat, CONFIG_FILE_NAME,
};

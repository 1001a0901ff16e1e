//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lessondoc_core::{
    generate_page, inspect_lesson, lesson_href, practice_href, render_lesson, CourseManifest,
    HtmlGenerator, Lesson, LessonFile, LessonHeader, RenderConfig,
};

/// Configuration file looked up next to the input
pub const CONFIG_FILE_NAME: &str = "lessondoc.toml";

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "lessondoc")]
#[command(author, version, about = "Lesson documents with living vocabulary", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a lesson file to HTML
    Render {
        /// Input lesson JSON file
        input: PathBuf,

        /// Output HTML file (default: input with .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (default: lessondoc.toml next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit a complete page with an embedded stylesheet
        #[arg(long)]
        standalone: bool,

        /// Course manifest used for the course name and lesson location
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Course slug used to build the practice link
        #[arg(long)]
        slug: Option<String>,
    },

    /// Check a lesson file for content the renderer degrades
    Check {
        /// Input lesson JSON file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the lessons of a course manifest
    Lessons {
        /// Course manifest JSON file
        manifest: PathBuf,

        /// Course slug used to build lesson links
        #[arg(long)]
        slug: Option<String>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            standalone,
            manifest,
            slug,
        } => {
            let course = CourseOptions {
                manifest: manifest.as_deref(),
                slug: slug.as_deref(),
            };
            render_command(
                &input,
                output.as_deref(),
                config.as_deref(),
                standalone,
                &course,
            )?;
        }
        Commands::Check { input, format } => {
            check_command(&input, format)?;
        }
        Commands::Lessons { manifest, slug } => {
            lessons_command(&manifest, slug.as_deref())?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Course context of a rendered lesson
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseOptions<'a> {
    /// Course manifest to look the lesson up in
    pub manifest: Option<&'a Path>,
    /// Course slug for page links
    pub slug: Option<&'a str>,
}

/// Owned text behind a `LessonHeader`
#[derive(Debug, Default)]
struct HeaderText {
    course: Option<String>,
    location: Option<String>,
    practice_href: Option<String>,
}

impl HeaderText {
    fn as_header(&self) -> LessonHeader<'_> {
        LessonHeader {
            course: self.course.as_deref(),
            location: self.location.as_deref(),
            practice_href: self.practice_href.as_deref(),
        }
    }
}

/// Execute the render command
///
/// Returns the path written.
pub fn render_command(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    standalone: bool,
    course: &CourseOptions<'_>,
) -> Result<PathBuf> {
    println!("lessondoc v{}", lessondoc_core::VERSION);
    println!("Rendering: {}", input.display());

    let config = load_config(input, config_path)?;
    let lesson = load_lesson(input)?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension("html"),
    };

    let header = header_text(&lesson, course)?;
    let nodes = render_lesson(&lesson, &header.as_header(), &config);
    let body = HtmlGenerator::with_config(config.html.clone()).generate(&nodes);
    let html = if standalone || config.html.standalone {
        let title = lesson
            .title
            .as_deref()
            .or(lesson.id.as_deref())
            .unwrap_or("Lesson");
        generate_page(title, &body)
    } else {
        body
    };

    fs::write(&output_path, &html)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    println!("  Sections: {}", lesson.content.sections.len());
    println!("  Vocabulary entries: {}", lesson.vocabulary.len());
    println!("  Output: {}", output_path.display());

    Ok(output_path)
}

/// Execute the check command
pub fn check_command(input: &Path, format: OutputFormat) -> Result<()> {
    let report = check_report(input, format)?;
    print!("{}", report);
    Ok(())
}

/// Build the check command's report
pub fn check_report(input: &Path, format: OutputFormat) -> Result<String> {
    let lesson = load_lesson(input)?;
    let diagnostics = inspect_lesson(&lesson).with_file(&input.display().to_string());

    let mut report = String::new();
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&diagnostics)
                .context("Failed to serialize diagnostics to JSON")?;
            writeln!(report, "{}", json)?;
        }
        OutputFormat::Text => {
            if diagnostics.is_empty() {
                writeln!(report, "✓ No issues found in {}", input.display())?;
            } else {
                for diag in diagnostics.iter() {
                    writeln!(report, "{}", diag)?;
                    writeln!(report)?;
                }
                writeln!(
                    report,
                    "Found {} warning(s) and {} note(s)",
                    diagnostics.warning_count(),
                    diagnostics.len() - diagnostics.warning_count()
                )?;
            }
        }
    }

    Ok(report)
}

/// Execute the lessons command
pub fn lessons_command(manifest: &Path, slug: Option<&str>) -> Result<()> {
    let report = lessons_report(manifest, slug)?;
    print!("{}", report);
    Ok(())
}

/// Build the lessons command's listing
pub fn lessons_report(manifest_path: &Path, slug: Option<&str>) -> Result<String> {
    let manifest = load_manifest(manifest_path)?;

    let mut report = String::new();
    if let Some(name) = manifest.course_name() {
        writeln!(report, "{}", name)?;
    }

    let lessons = manifest.collect_lessons();
    for descriptor in &lessons {
        let lesson = &descriptor.lesson;
        write!(
            report,
            "- {}: {}",
            lesson.id.as_deref().unwrap_or("?"),
            lesson.title.as_deref().unwrap_or("Untitled Lesson")
        )?;

        let location = descriptor.location_label();
        if !location.is_empty() {
            write!(report, " [{}]", location)?;
        }
        if let Some(href) = slug.and_then(|slug| lesson_href(slug, lesson)) {
            write!(report, " -> {}", href)?;
        }
        writeln!(report)?;
    }
    writeln!(report, "{} lesson(s)", lessons.len())?;

    Ok(report)
}

/// Resolve the lesson's course name, location and practice link
fn header_text(lesson: &LessonFile, course: &CourseOptions<'_>) -> Result<HeaderText> {
    let mut header = HeaderText::default();
    let mut entry = Lesson {
        id: lesson.id.clone(),
        title: lesson.title.clone(),
        path: None,
    };

    if let Some(manifest_path) = course.manifest {
        let manifest = load_manifest(manifest_path)?;
        let Some(id) = lesson.id.as_deref() else {
            anyhow::bail!("Lesson has no id to look up in {}", manifest_path.display());
        };
        let descriptor = manifest
            .find_lesson(id)
            .with_context(|| format!("Failed to locate lesson in {}", manifest_path.display()))?;

        header.course = manifest.course_name().map(str::to_string);
        header.location = Some(descriptor.location_label()).filter(|label| !label.is_empty());
        entry = descriptor.lesson;
        debug!(lesson = id, location = ?header.location, "lesson located in manifest");
    }

    header.practice_href = course.slug.and_then(|slug| practice_href(slug, &entry));
    Ok(header)
}

/// Read and parse a course manifest
fn load_manifest(path: &Path) -> Result<CourseManifest> {
    if !path.exists() {
        anyhow::bail!("Manifest not found: {}", path.display());
    }
    CourseManifest::load(path)
        .with_context(|| format!("Failed to load manifest: {}", path.display()))
}

/// Read and parse a lesson file
fn load_lesson(input: &Path) -> Result<LessonFile> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    LessonFile::load(input)
        .with_context(|| format!("Failed to load lesson: {}", input.display()))
}

/// Load the explicit configuration, else `lessondoc.toml` next to the input,
/// else defaults
fn load_config(input: &Path, explicit: Option<&Path>) -> Result<RenderConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let candidate = input
                .parent()
                .unwrap_or(Path::new("."))
                .join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                debug!("no {} next to input, using defaults", CONFIG_FILE_NAME);
                return Ok(RenderConfig::default());
            }
            candidate
        }
    };

    println!("  Loading config: {}", path.display());
    RenderConfig::load(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))
}

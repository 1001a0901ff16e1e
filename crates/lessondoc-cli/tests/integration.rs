//! Integration tests for lessondoc CLI
//!
//! These tests drive the commands against lesson files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use lessondoc_cli::{check_report, lessons_report, render_command, CourseOptions, OutputFormat};
use serde_json::json;
use tempfile::TempDir;

/// Write a lesson with one resolved and one unresolved reference
fn write_lesson(dir: &Path) -> PathBuf {
    let lesson = json!({
        "id": "greetings",
        "title": "Greetings & Animals",
        "content": {"sections": [
            {"id": "intro", "title": "Intro", "type": "rich", "order_index": 0,
             "content": {"type": "doc", "content": [
                 {"type": "paragraph", "content": [
                     {"type": "text", "text": "A "},
                     {"type": "reference", "attrs": {"table_name": "Words", "record_key": 1, "value": "neko"}},
                     {"type": "text", "text": " and a "},
                     {"type": "reference", "attrs": {"table_name": "Words", "record_key": 2, "value": "inu"}}
                 ]}
             ]}}
        ]},
        "vocabulary": [
            {"ref": {"table": "Words", "key": 1}, "data": {"Word": "猫", "Meaning": "cat"}}
        ]
    });
    let path = dir.join("lesson.json");
    fs::write(&path, serde_json::to_string_pretty(&lesson).unwrap()).unwrap();
    path
}

#[test]
fn test_render_fragment() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());

    let written = render_command(&input, None, None, false, &CourseOptions::default()).unwrap();
    assert_eq!(written, dir.path().join("lesson.html"));

    let html = fs::read_to_string(&written).unwrap();
    assert!(html.starts_with("<article class=\"lesson\">"));
    assert!(html.contains("<h1>Greetings &amp; Animals</h1>"));
    assert!(html.contains("class=\"reference-card\""));
    assert!(html.contains("<span class=\"reference-label\""));
    assert!(!html.contains("<!DOCTYPE html>"));
}

#[test]
fn test_render_standalone_with_output() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());
    let output = dir.path().join("out").with_extension("htm");

    render_command(&input, Some(&output), None, true, &CourseOptions::default()).unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Greetings &amp; Animals</title>"));
    assert!(html.contains("<style>"));
}

#[test]
fn test_render_uses_config_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());
    fs::write(
        dir.path().join("lessondoc.toml"),
        "[html]\ncontainer_class = \"prose\"\nstandalone = true\n\n[vocabulary]\ntitle = \"Words\"\n",
    )
    .unwrap();

    let written = render_command(&input, None, None, false, &CourseOptions::default()).unwrap();
    let html = fs::read_to_string(written).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<div class=\"prose\">"));
    assert!(html.contains("<h2>Words</h2>"));
}

#[test]
fn test_render_invalid_config() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[html\n").unwrap();

    let err = render_command(&input, None, Some(&config), false, &CourseOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}

#[test]
fn test_render_missing_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let err = render_command(&missing, None, None, false, &CourseOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_render_invalid_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("lesson.json");
    fs::write(&input, "{not json").unwrap();

    let err = render_command(&input, None, None, false, &CourseOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to load lesson"));
}

/// Write a manifest placing the "greetings" lesson in a section and unit
fn write_manifest(dir: &Path) -> PathBuf {
    let manifest = json!({
        "project": {"name": "Japanese"},
        "courseStructure": [{
            "title": "Basics",
            "lessons": null,
            "units": [{"title": "Animals", "lessons": [{"id": "greetings", "title": "Greetings"}]}]
        }]
    });
    let path = dir.join("manifest.json");
    fs::write(&path, manifest.to_string()).unwrap();
    path
}

#[test]
fn test_render_with_course_context() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());
    let manifest = write_manifest(dir.path());
    let course = CourseOptions {
        manifest: Some(manifest.as_path()),
        slug: Some("jp"),
    };

    let written = render_command(&input, None, None, false, &course).unwrap();
    let html = fs::read_to_string(written).unwrap();
    assert!(html.contains("<p class=\"lesson-course\">Japanese</p>"));
    assert!(html.contains("<p class=\"lesson-location\">Basics • Animals</p>"));
    assert!(html.contains("href=\"/courses/jp/lessons/greetings/practice\""));
}

#[test]
fn test_render_lesson_missing_from_manifest() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());
    let manifest = dir.path().join("manifest.json");
    fs::write(&manifest, r#"{"courseStructure": []}"#).unwrap();
    let course = CourseOptions {
        manifest: Some(manifest.as_path()),
        slug: None,
    };

    let err = render_command(&input, None, None, false, &course).unwrap_err();
    assert!(err.to_string().contains("Failed to locate lesson"));

    let absent = dir.path().join("nope.json");
    let missing = CourseOptions {
        manifest: Some(absent.as_path()),
        slug: None,
    };
    let err = render_command(&input, None, None, false, &missing).unwrap_err();
    assert!(err.to_string().contains("Manifest not found"));
}

#[test]
fn test_check_text_report() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());

    let report = check_report(&input, OutputFormat::Text).unwrap();
    assert!(report.contains("warning[L004]"));
    assert!(report.contains("lesson.json#section-intro-0-paragraph-3"));
    assert!(report.contains("Found 1 warning(s) and 0 note(s)"));
}

#[test]
fn test_check_json_report() {
    let dir = TempDir::new().unwrap();
    let input = write_lesson(dir.path());

    let report = check_report(&input, OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
    let diagnostics = parsed.as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["code"], "L004");
    assert_eq!(diagnostics[0]["severity"], "warning");
}

#[test]
fn test_check_clean_lesson() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("clean.json");
    fs::write(&input, r#"{"title": "Empty"}"#).unwrap();

    let report = check_report(&input, OutputFormat::Text).unwrap();
    assert!(report.starts_with("✓ No issues found"));
}

#[test]
fn test_lessons_report() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.json");
    fs::write(
        &manifest,
        json!({
            "project": {"name": "Japanese"},
            "courseStructure": [{
                "title": "Basics",
                "lessons": [{"id": "intro", "title": "Intro"}],
                "units": [{"title": "Row 1", "lessons": [{"id": "l1", "title": "Animals"}]}]
            }]
        })
        .to_string(),
    )
    .unwrap();

    let report = lessons_report(&manifest, Some("jp")).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Japanese",
            "- intro: Intro [Basics] -> /courses/jp/lessons/intro",
            "- l1: Animals [Basics] -> /courses/jp/lessons/l1",
            "2 lesson(s)",
        ]
    );

    let without_slug = lessons_report(&manifest, None).unwrap();
    assert!(!without_slug.contains("->"));
}

#[test]
fn test_lessons_missing_manifest() {
    let dir = TempDir::new().unwrap();
    assert!(lessons_report(&dir.path().join("manifest.json"), None).is_err());
}

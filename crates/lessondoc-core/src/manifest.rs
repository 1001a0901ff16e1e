//! Course manifests
//!
//! A manifest describes a course as sections, each holding lessons directly
//! and/or grouped into units. Lesson entries point at lesson files relative
//! to the course directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use lessondoc_ast::lenient;
use serde::{Deserialize, Serialize};

use crate::error::{LessonError, Result};

/// Course manifest as stored in `manifest.json`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseManifest {
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::optional")]
    pub project: Option<ProjectInfo>,
    #[serde(deserialize_with = "lenient::seq_or_empty")]
    pub course_structure: Vec<CourseSection>,
}

/// Course-level metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// Top-level grouping of a course
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSection {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::seq_or_empty")]
    pub lessons: Vec<Lesson>,
    #[serde(deserialize_with = "lenient::seq_or_empty")]
    pub units: Vec<CourseUnit>,
}

/// Grouping of lessons inside a section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseUnit {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::seq_or_empty")]
    pub lessons: Vec<Lesson>,
}

/// A lesson entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lesson {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Lesson file path, relative to the course directory
    pub path: Option<String>,
}

/// A lesson together with where it sits in the course
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonDescriptor {
    pub lesson: Lesson,
    pub section_id: Option<String>,
    pub section_title: Option<String>,
    pub unit_id: Option<String>,
    pub unit_title: Option<String>,
}

impl CourseManifest {
    /// Parse a manifest from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Course display name
    pub fn course_name(&self) -> Option<&str> {
        self.project.as_ref()?.name.as_deref()
    }

    /// Every lesson in course order
    ///
    /// Within a section, its direct lessons come before the lessons of its
    /// units.
    pub fn collect_lessons(&self) -> Vec<LessonDescriptor> {
        let mut lessons = Vec::new();

        for section in &self.course_structure {
            for lesson in &section.lessons {
                lessons.push(LessonDescriptor {
                    lesson: lesson.clone(),
                    section_id: section.id.clone(),
                    section_title: section.title.clone(),
                    unit_id: None,
                    unit_title: None,
                });
            }

            for unit in &section.units {
                for lesson in &unit.lessons {
                    lessons.push(LessonDescriptor {
                        lesson: lesson.clone(),
                        section_id: section.id.clone(),
                        section_title: section.title.clone(),
                        unit_id: unit.id.clone(),
                        unit_title: unit.title.clone(),
                    });
                }
            }
        }

        lessons
    }

    /// Find a lesson by id
    pub fn find_lesson(&self, lesson_id: &str) -> Result<LessonDescriptor> {
        self.collect_lessons()
            .into_iter()
            .find(|descriptor| descriptor.lesson.id.as_deref() == Some(lesson_id))
            .ok_or_else(|| LessonError::LessonNotFound(lesson_id.to_string()))
    }
}

impl LessonDescriptor {
    /// "Section • Unit", omitting blank and placeholder parts
    pub fn location_label(&self) -> String {
        let section = self
            .section_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty());
        let unit = display_unit_title(self.unit_title.as_deref());

        [section, unit]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" • ")
    }

    /// Lesson file location under `course_dir`
    pub fn lesson_path(&self, course_dir: &Path) -> Result<PathBuf> {
        match self.lesson.path.as_deref() {
            Some(path) if !path.is_empty() => Ok(course_dir.join(path)),
            _ => Err(LessonError::MissingPath(
                self.lesson.id.clone().unwrap_or_default(),
            )),
        }
    }
}

/// Page route of a lesson; lessons without an id have none
pub fn lesson_href(slug: &str, lesson: &Lesson) -> Option<String> {
    let id = lesson.id.as_deref()?;
    Some(format!("/courses/{}/lessons/{}", slug, id))
}

/// Route of a lesson's vocabulary practice page
pub fn practice_href(slug: &str, lesson: &Lesson) -> Option<String> {
    lesson_href(slug, lesson).map(|href| format!("{}/practice", href))
}

/// Unit title worth showing
///
/// Blank titles and spreadsheet placeholders such as "Row 12" are hidden.
pub fn display_unit_title(title: Option<&str>) -> Option<&str> {
    static ROW_TITLE: OnceLock<Regex> = OnceLock::new();
    let re = ROW_TITLE.get_or_init(|| Regex::new(r"(?i)^Row\s+\d+$").unwrap());

    let title = title?.trim();
    if title.is_empty() || re.is_match(title) {
        None
    } else {
        Some(title)
    }
}

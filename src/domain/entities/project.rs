use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::{Validate, ValidationError};

use crate::{entities::option_fields::OptionField, utils::markdown::safe_markdown_to_html};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 255;
const MIN_SLUG_LENGTH: u64 = 3;
const MAX_SLUG_LENGTH: u64 = 255;
const MAX_CATEGORY_LENGTH: u64 = 100;
const MAX_URL_LENGTH: u64 = 500;

/// The four lifecycle states a project can be in. Mirrors the
/// `project_status` Postgres enum value for value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, sqlx::Type,
)]
#[sqlx(type_name = "project_status")]
pub enum ProjectStatus {
    #[sqlx(rename = "Planning")]
    #[serde(rename = "Planning")]
    #[display("Planning")]
    Planning,

    #[default]
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    #[display("In Progress")]
    InProgress,

    #[sqlx(rename = "Complete")]
    #[serde(rename = "Complete")]
    #[display("Complete")]
    Complete,

    #[sqlx(rename = "On Hold")]
    #[serde(rename = "On Hold")]
    #[display("On Hold")]
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Complete,
        ProjectStatus::OnHold,
    ];
}

impl FromStr for ProjectStatus {
    type Err = String;

    /// Accepts the canonical form plus URL-friendly variants
    /// ("in-progress", "on_hold").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "in progress" => Ok(ProjectStatus::InProgress),
            "complete" => Ok(ProjectStatus::Complete),
            "on hold" => Ok(ProjectStatus::OnHold),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

// ───── Database Model ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub technologies: Json<Vec<String>>,
    pub status: ProjectStatus,
    pub category: String,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub screenshots: Json<Vec<String>>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub featured: bool,
    pub priority: i32,
    pub slug: String,
    pub tags: Json<Vec<String>>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[validate(length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    pub long_description: Option<String>,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub status: ProjectStatus,

    #[validate(length(min = 1, max = MAX_CATEGORY_LENGTH))]
    pub category: String,

    #[validate(length(max = MAX_URL_LENGTH), custom(function = "validate_optional_url"))]
    pub demo_url: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH), custom(function = "validate_optional_url"))]
    pub github_url: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub image_url: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub screenshots: Vec<String>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub priority: i32,

    /// Omitted or blank slug is derived from the title on insert.
    #[validate(length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH), custom(function = "validate_optional_slug"))]
    pub slug: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub challenges: Option<String>,
    pub learnings: Option<String>,
}

/// Insert-ready project with the slug resolved. Timestamps are assigned
/// server-side by the insert statement.
#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub technologies: Vec<String>,
    pub status: ProjectStatus,
    pub category: String,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub screenshots: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub featured: bool,
    pub priority: i32,
    pub slug: String,
    pub tags: Vec<String>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
}

impl From<NewProject> for ProjectInsert {
    fn from(new: NewProject) -> Self {
        let slug = match new.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slug::slugify(&new.title),
        };

        ProjectInsert {
            title: new.title,
            description: new.description,
            long_description: new.long_description,
            technologies: new.technologies,
            status: new.status,
            category: new.category,
            demo_url: new.demo_url,
            github_url: new.github_url,
            image_url: new.image_url,
            thumbnail_url: new.thumbnail_url,
            screenshots: new.screenshots,
            start_date: new.start_date,
            end_date: new.end_date,
            featured: new.featured,
            priority: new.priority,
            slug,
            tags: new.tags,
            challenges: new.challenges,
            learnings: new.learnings,
        }
    }
}

/// Partial update. The slug is immutable after creation and therefore
/// not part of the patch.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH))]
    pub title: OptionField<String>,

    pub description: OptionField<String>,
    pub long_description: OptionField<String>,
    pub technologies: OptionField<Vec<String>>,
    pub status: OptionField<ProjectStatus>,

    #[validate(length(min = 1, max = MAX_CATEGORY_LENGTH))]
    pub category: OptionField<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub demo_url: OptionField<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub github_url: OptionField<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub image_url: OptionField<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub thumbnail_url: OptionField<String>,

    pub screenshots: OptionField<Vec<String>>,
    pub start_date: OptionField<DateTime<Utc>>,
    pub end_date: OptionField<DateTime<Utc>>,
    pub featured: OptionField<bool>,
    pub priority: OptionField<i32>,
    pub tags: OptionField<Vec<String>>,
    pub challenges: OptionField<String>,
    pub learnings: OptionField<String>,
}

impl UpdateProjectRequest {
    /// Columns that are NOT NULL in the schema and must not be patched
    /// to null.
    pub fn non_nullable_violations(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_set_to_null() {
            fields.push("title");
        }
        if self.description.is_set_to_null() {
            fields.push("description");
        }
        if self.technologies.is_set_to_null() {
            fields.push("technologies");
        }
        if self.status.is_set_to_null() {
            fields.push("status");
        }
        if self.category.is_set_to_null() {
            fields.push("category");
        }
        if self.screenshots.is_set_to_null() {
            fields.push("screenshots");
        }
        if self.start_date.is_set_to_null() {
            fields.push("startDate");
        }
        if self.featured.is_set_to_null() {
            fields.push("featured");
        }
        if self.priority.is_set_to_null() {
            fields.push("priority");
        }
        if self.tags.is_set_to_null() {
            fields.push("tags");
        }
        fields
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedProjects {
    pub projects: Vec<Project>,
    pub total_count: i64,
    pub total_pages: u32,
    pub current_page: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginatedProjects {
    pub fn assemble(projects: Vec<Project>, total_count: i64, page: u32, limit: u32) -> Self {
        let total_pages = (total_count.max(0) as u64).div_ceil(limit.max(1) as u64) as u32;

        PaginatedProjects {
            projects,
            total_count,
            total_pages,
            current_page: page,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: i64,
    pub featured: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub planning: i64,
    pub on_hold: i64,
    pub categories: i64,
    pub technologies: i64,
}

/// Detail view returned for a single project; carries the long
/// description rendered to sanitized HTML alongside the raw record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub long_description_html: Option<String>,
}

impl From<Project> for ProjectDetailResponse {
    fn from(project: Project) -> Self {
        let long_description_html = project
            .long_description
            .as_deref()
            .map(safe_markdown_to_html);

        ProjectDetailResponse {
            project,
            long_description_html,
        }
    }
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_optional_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(new_validation_error(
            "invalid_slug",
            "Slug may only contain lowercase letters, digits and hyphens",
        ))
    }
}

fn new_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

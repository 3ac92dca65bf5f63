use chrono::{DateTime, Duration, Utc};
use portfolio_site_api::entities::project::{Project, ProjectStatus};
use sqlx::types::Json;

/// Builder for project rows used across the listing tests.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    pub featured: bool,
    pub priority: i32,
    pub slug: String,
    pub long_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ProjectFixture {
    pub fn new(id: i32, title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = slug::slugify(&title);
        Self {
            id,
            title,
            description: "A test project".to_string(),
            category: "Web Development".to_string(),
            status: ProjectStatus::Complete,
            featured: false,
            priority: 0,
            slug,
            long_description: None,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[allow(dead_code)]
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    #[allow(dead_code)]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[allow(dead_code)]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[allow(dead_code)]
    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    #[allow(dead_code)]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[allow(dead_code)]
    pub fn long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = Some(text.into());
        self
    }

    #[allow(dead_code)]
    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.created_at = Utc::now() - Duration::days(days);
        self
    }

    #[allow(dead_code)]
    pub fn soft_deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    pub fn build(self) -> Project {
        Project {
            id: self.id,
            title: self.title,
            description: self.description,
            long_description: self.long_description,
            technologies: Json(vec!["Rust".to_string()]),
            status: self.status,
            category: self.category,
            demo_url: None,
            github_url: None,
            image_url: None,
            thumbnail_url: None,
            screenshots: Json(Vec::new()),
            start_date: self.created_at,
            end_date: None,
            featured: self.featured,
            priority: self.priority,
            slug: self.slug,
            tags: Json(Vec::new()),
            challenges: None,
            learnings: None,
            updated_at: None,
            created_at: self.created_at,
            deleted_at: self.deleted_at,
        }
    }
}

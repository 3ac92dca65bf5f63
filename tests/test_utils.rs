use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use portfolio_site_api::{
    entities::project::{Project, ProjectInsert, ProjectStats, ProjectStatus, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
};
use sqlx::types::Json;

/// In-memory stand-in for the Postgres project repository. Mirrors the
/// SQL semantics the handlers rely on: soft-deleted rows are invisible,
/// listings sort by priority then recency, and search matches title,
/// description and category case-insensitively.
pub struct InMemoryProjectRepo {
    projects: Mutex<Vec<Project>>,
}

impl InMemoryProjectRepo {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
        }
    }

    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    fn active_sorted(&self) -> Vec<Project> {
        let mut active: Vec<Project> = self
            .projects
            .lock()
            .iter()
            .filter(|p| p.deleted_at.is_none())
            .cloned()
            .collect();
        sort_for_display(&mut active);
        active
    }
}

fn sort_for_display(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.created_at.cmp(&a.created_at))
    });
}

fn matches_query(project: &Project, query: &str) -> bool {
    let q = query.to_lowercase();
    project.title.to_lowercase().contains(&q)
        || project.description.to_lowercase().contains(&q)
        || project.category.to_lowercase().contains(&q)
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.active_sorted())
    }

    async fn get_paginated_projects(
        &self,
        page: u32,
        per_page: u32,
        query: Option<&str>,
    ) -> Result<(Vec<Project>, i64), AppError> {
        let filtered: Vec<Project> = self
            .active_sorted()
            .into_iter()
            .filter(|p| query.map_or(true, |q| matches_query(p, q)))
            .collect();

        let total = filtered.len() as i64;
        let offset = (page.saturating_sub(1) as usize) * per_page as usize;
        let pageful = filtered
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();

        Ok((pageful, total))
    }

    async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self
            .active_sorted()
            .into_iter()
            .filter(|p| p.featured)
            .collect())
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        Ok(self
            .active_sorted()
            .into_iter()
            .find(|p| p.slug == slug))
    }

    async fn get_projects_by_category(&self, category: &str) -> Result<Vec<Project>, AppError> {
        Ok(self
            .active_sorted()
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    async fn get_projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, AppError> {
        Ok(self
            .active_sorted()
            .into_iter()
            .filter(|p| p.status == status)
            .collect())
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let mut projects = self.projects.lock();

        if projects.iter().any(|p| p.slug == project.slug) {
            return Err(AppError::Conflict("Slug already exists".into()));
        }

        let now = Utc::now();
        let created = Project {
            id: projects.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            title: project.title.clone(),
            description: project.description.clone(),
            long_description: project.long_description.clone(),
            technologies: Json(project.technologies.clone()),
            status: project.status,
            category: project.category.clone(),
            demo_url: project.demo_url.clone(),
            github_url: project.github_url.clone(),
            image_url: project.image_url.clone(),
            thumbnail_url: project.thumbnail_url.clone(),
            screenshots: Json(project.screenshots.clone()),
            start_date: project.start_date.unwrap_or(now),
            end_date: project.end_date,
            featured: project.featured,
            priority: project.priority,
            slug: project.slug.clone(),
            tags: Json(project.tags.clone()),
            challenges: project.challenges.clone(),
            learnings: project.learnings.clone(),
            updated_at: None,
            created_at: now,
            deleted_at: None,
        };

        projects.push(created.clone());
        Ok(created)
    }

    async fn update_project(
        &self,
        id: i32,
        patch: &UpdateProjectRequest,
    ) -> Result<Option<Project>, AppError> {
        let mut projects = self.projects.lock();
        let Some(project) = projects
            .iter_mut()
            .find(|p| p.id == id && p.deleted_at.is_none())
        else {
            return Ok(None);
        };

        if let Some(title) = patch.title.value_ref() {
            project.title = title.clone();
        }
        if let Some(description) = patch.description.value_ref() {
            project.description = description.clone();
        }
        if let Some(long_description) = patch.long_description.as_ref_option() {
            project.long_description = long_description.cloned();
        }
        if let Some(technologies) = patch.technologies.value_ref() {
            project.technologies = Json(technologies.clone());
        }
        if let Some(status) = patch.status.value_ref() {
            project.status = *status;
        }
        if let Some(category) = patch.category.value_ref() {
            project.category = category.clone();
        }
        if let Some(featured) = patch.featured.value_ref() {
            project.featured = *featured;
        }
        if let Some(priority) = patch.priority.value_ref() {
            project.priority = *priority;
        }
        if let Some(end_date) = patch.end_date.as_ref_option() {
            project.end_date = end_date.copied();
        }
        project.updated_at = Some(Utc::now());

        Ok(Some(project.clone()))
    }

    async fn soft_delete_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        let mut projects = self.projects.lock();
        let Some(project) = projects
            .iter_mut()
            .find(|p| p.id == id && p.deleted_at.is_none())
        else {
            return Ok(None);
        };

        let now = Utc::now();
        project.deleted_at = Some(now);
        project.updated_at = Some(now);
        Ok(Some(project.clone()))
    }

    async fn get_project_stats(&self) -> Result<ProjectStats, AppError> {
        let active = self.active_sorted();

        let count_status =
            |status: ProjectStatus| active.iter().filter(|p| p.status == status).count() as i64;

        let mut categories: Vec<&str> = active.iter().map(|p| p.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();

        let mut technologies: Vec<&str> = active
            .iter()
            .flat_map(|p| p.technologies.0.iter().map(String::as_str))
            .collect();
        technologies.sort_unstable();
        technologies.dedup();

        Ok(ProjectStats {
            total: active.len() as i64,
            featured: active.iter().filter(|p| p.featured).count() as i64,
            completed: count_status(ProjectStatus::Complete),
            in_progress: count_status(ProjectStatus::InProgress),
            planning: count_status(ProjectStatus::Planning),
            on_hold: count_status(ProjectStatus::OnHold),
            categories: categories.len() as i64,
            technologies: technologies.len() as i64,
        })
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}

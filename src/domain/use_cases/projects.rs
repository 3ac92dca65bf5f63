use validator::Validate;

use crate::{
    entities::project::{
        NewProject, PaginatedProjects, Project, ProjectInsert, ProjectStats, ProjectStatus,
        UpdateProjectRequest,
    },
    errors::{AppError, FieldError},
    repositories::project::ProjectRepository,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
    default_page_size: u32,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R, default_page_size: u32) -> Self {
        ProjectHandler {
            project_repo,
            default_page_size: default_page_size.max(1),
        }
    }

    /// All active projects, most important first. Unbounded.
    pub async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.get_projects().await
    }

    /// One page of active projects plus the pagination envelope. A
    /// blank query is treated as no query; page numbers below 1 clamp
    /// to the first page.
    pub async fn get_paginated_projects(
        &self,
        page: u32,
        query: Option<&str>,
    ) -> Result<PaginatedProjects, AppError> {
        let page = page.max(1);
        let limit = self.default_page_size;
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let (projects, total_count) = self
            .project_repo
            .get_paginated_projects(page, limit, query)
            .await?;

        Ok(PaginatedProjects::assemble(projects, total_count, page, limit))
    }

    pub async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.get_featured_projects().await
    }

    /// `None` for an unknown slug; absence is not an error here.
    pub async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        self.project_repo.get_project_by_slug(slug).await
    }

    pub async fn get_projects_by_category(&self, category: &str) -> Result<Vec<Project>, AppError> {
        self.project_repo.get_projects_by_category(category).await
    }

    pub async fn get_projects_by_status(&self, status: &str) -> Result<Vec<Project>, AppError> {
        let status: ProjectStatus = status
            .parse()
            .map_err(|_| AppError::validation("status", "Unknown project status"))?;

        self.project_repo.get_projects_by_status(status).await
    }

    /// Validates and inserts a new project. Duplicate slugs surface as
    /// a conflict from the repository.
    pub async fn create_project(&self, project: NewProject) -> Result<Project, AppError> {
        project.validate()?;

        let insert = ProjectInsert::from(project);
        self.project_repo.create_project(&insert).await
    }

    /// Partial update. `None` when the id does not exist or the project
    /// was already soft-deleted.
    pub async fn update_project(
        &self,
        id: i32,
        patch: &UpdateProjectRequest,
    ) -> Result<Option<Project>, AppError> {
        patch.validate()?;

        let null_violations = patch.non_nullable_violations();
        if !null_violations.is_empty() {
            let errors = null_violations
                .into_iter()
                .map(|field| FieldError {
                    field: field.to_string(),
                    message: "Field cannot be set to null".to_string(),
                })
                .collect();
            return Err(AppError::ValidationError(errors));
        }

        self.project_repo.update_project(id, patch).await
    }

    pub async fn soft_delete_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        self.project_repo.soft_delete_project(id).await
    }

    pub async fn get_project_stats(&self) -> Result<ProjectStats, AppError> {
        self.project_repo.get_project_stats().await
    }
}

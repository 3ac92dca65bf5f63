use async_trait::async_trait;
use sqlx::{self, PgPool, Postgres, QueryBuilder, types::Json};

use crate::{
    entities::{
        option_fields::OptionField,
        project::{Project, ProjectInsert, ProjectStats, ProjectStatus, UpdateProjectRequest},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Every public listing sorts the same way: most important first, then
/// newest first.
const DISPLAY_ORDER: &str = " ORDER BY priority DESC, created_at DESC";

/// Helper to compute OFFSET safely from 1-based `page` and `per_page`.
fn page_offset(page: u32, per_page: u32) -> i64 {
    let page = page.saturating_sub(1);
    (page as i64) * (per_page as i64)
}

/// Appends the WHERE clause shared by the paginated listing and its
/// count query. Both go through here so the two can never disagree on
/// which rows they consider.
fn push_listing_filter<'args>(builder: &mut QueryBuilder<'args, Postgres>, query: Option<&str>) {
    builder.push(" WHERE deleted_at IS NULL");

    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", q);
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR category ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

fn push_set<'args, T>(builder: &mut QueryBuilder<'args, Postgres>, column: &str, field: &OptionField<T>)
where
    T: Clone + Send + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + 'args,
{
    match field {
        OptionField::Unchanged => {}
        OptionField::SetToNull => {
            builder.push(", ");
            builder.push(column);
            builder.push(" = NULL");
        }
        OptionField::SetToValue(value) => {
            builder.push(", ");
            builder.push(column);
            builder.push(" = ");
            builder.push_bind(value.clone());
        }
    }
}

fn push_set_json<'args>(
    builder: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    field: &OptionField<Vec<String>>,
) {
    match field {
        OptionField::Unchanged => {}
        OptionField::SetToNull => {
            builder.push(", ");
            builder.push(column);
            builder.push(" = NULL");
        }
        OptionField::SetToValue(values) => {
            builder.push(", ");
            builder.push(column);
            builder.push(" = ");
            builder.push_bind(Json(values.clone()));
        }
    }
}

#[async_trait]
pub trait ProjectRepository: Sync + Send {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_paginated_projects(
        &self,
        page: u32,
        per_page: u32,
        query: Option<&str>,
    ) -> Result<(Vec<Project>, i64), AppError>;
    async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError>;
    async fn get_projects_by_category(&self, category: &str) -> Result<Vec<Project>, AppError>;
    async fn get_projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(
        &self,
        id: i32,
        patch: &UpdateProjectRequest,
    ) -> Result<Option<Project>, AppError>;
    async fn soft_delete_project(&self, id: i32) -> Result<Option<Project>, AppError>;
    async fn get_project_stats(&self) -> Result<ProjectStats, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn get_projects(&self) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects");
        push_listing_filter(&mut builder, None);
        builder.push(DISPLAY_ORDER);

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn get_paginated_projects(
        &self,
        page: u32,
        per_page: u32,
        query: Option<&str>,
    ) -> Result<(Vec<Project>, i64), AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects");
        push_listing_filter(&mut builder, query);
        builder.push(DISPLAY_ORDER);
        builder.push(" LIMIT ");
        builder.push_bind(per_page as i64);
        builder.push(" OFFSET ");
        builder.push_bind(page_offset(page, per_page));

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        // Separate count over the identical filter, per the listing page
        // contract.
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM projects");
        push_listing_filter(&mut count_builder, query);

        let total_count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((projects, total_count))
    }

    async fn get_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE featured = TRUE AND deleted_at IS NULL
            ORDER BY priority DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE slug = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn get_projects_by_category(&self, category: &str) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE category = $1 AND deleted_at IS NULL
            ORDER BY priority DESC, created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE status = $1 AND deleted_at IS NULL
            ORDER BY priority DESC, created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, description, long_description, technologies, status, category,
                demo_url, github_url, image_url, thumbnail_url, screenshots,
                start_date, end_date, featured, priority, slug, tags,
                challenges, learnings, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                COALESCE($12, NOW()), $13, $14, $15, $16, $17, $18, $19, NOW()
            )
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.long_description)
        .bind(Json(&project.technologies))
        .bind(project.status)
        .bind(&project.category)
        .bind(&project.demo_url)
        .bind(&project.github_url)
        .bind(&project.image_url)
        .bind(&project.thumbnail_url)
        .bind(Json(&project.screenshots))
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.featured)
        .bind(project.priority)
        .bind(&project.slug)
        .bind(Json(&project.tags))
        .bind(&project.challenges)
        .bind(&project.learnings)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("projects_slug_key") {
                    return AppError::Conflict("Slug already exists".into());
                }
            }
            AppError::from(e)
        })?;

        Ok(created)
    }

    async fn update_project(
        &self,
        id: i32,
        patch: &UpdateProjectRequest,
    ) -> Result<Option<Project>, AppError> {
        let mut builder = QueryBuilder::new("UPDATE projects SET updated_at = NOW()");

        push_set(&mut builder, "title", &patch.title);
        push_set(&mut builder, "description", &patch.description);
        push_set(&mut builder, "long_description", &patch.long_description);
        push_set_json(&mut builder, "technologies", &patch.technologies);
        push_set(&mut builder, "status", &patch.status);
        push_set(&mut builder, "category", &patch.category);
        push_set(&mut builder, "demo_url", &patch.demo_url);
        push_set(&mut builder, "github_url", &patch.github_url);
        push_set(&mut builder, "image_url", &patch.image_url);
        push_set(&mut builder, "thumbnail_url", &patch.thumbnail_url);
        push_set_json(&mut builder, "screenshots", &patch.screenshots);
        push_set(&mut builder, "start_date", &patch.start_date);
        push_set(&mut builder, "end_date", &patch.end_date);
        push_set(&mut builder, "featured", &patch.featured);
        push_set(&mut builder, "priority", &patch.priority);
        push_set_json(&mut builder, "tags", &patch.tags);
        push_set(&mut builder, "challenges", &patch.challenges);
        push_set(&mut builder, "learnings", &patch.learnings);

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND deleted_at IS NULL RETURNING *");

        let updated = builder
            .build_query_as::<Project>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn soft_delete_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        let deleted = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }

    async fn get_project_stats(&self) -> Result<ProjectStats, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        let featured: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects WHERE featured = TRUE AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let status_counts: Vec<(ProjectStatus, i64)> = sqlx::query_as(
            r#"
            SELECT status, COUNT(*)
            FROM projects
            WHERE deleted_at IS NULL
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let categories: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT category) FROM projects WHERE deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        // Technologies live in a JSON array per row; flatten before
        // counting distinct entries.
        let technologies: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT tech.value)
            FROM projects
            CROSS JOIN LATERAL json_array_elements_text(technologies) AS tech(value)
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let mut stats = ProjectStats {
            total,
            featured,
            categories,
            technologies,
            ..ProjectStats::default()
        };

        for (status, count) in status_counts {
            match status {
                ProjectStatus::Planning => stats.planning = count,
                ProjectStatus::InProgress => stats.in_progress = count,
                ProjectStatus::Complete => stats.completed = count,
                ProjectStatus::OnHold => stats.on_hold = count,
            }
        }

        Ok(stats)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

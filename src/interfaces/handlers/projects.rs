use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{entities::project::ProjectDetailResponse, errors::AppError, AppState};

/// Query parameters consumed by the listing page.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub page: Option<u32>,
    pub query: Option<String>,
}

#[instrument(skip(state))]
pub async fn list_projects(
    state: web::Data<AppState>,
    params: web::Query<ListingQuery>,
) -> Result<impl Responder, AppError> {
    let page = params.page.unwrap_or(1);

    let listing = state
        .project_handler
        .get_paginated_projects(page, params.query.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(listing))
}

#[instrument(skip(state))]
pub async fn list_all_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.get_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn list_featured_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.get_featured_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_project_stats(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let stats = state.project_handler.get_project_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[instrument(skip(state))]
pub async fn list_projects_by_category(
    category: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state
        .project_handler
        .get_projects_by_category(&category)
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn list_projects_by_status(
    status: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.get_projects_by_status(&status).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Absence at the repository is `None`; at the HTTP boundary a missing
/// project is a 404.
#[instrument(skip(state))]
pub async fn get_project_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .get_project_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    Ok(HttpResponse::Ok().json(ProjectDetailResponse::from(project)))
}

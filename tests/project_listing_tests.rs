mod test_project;
mod test_utils;

use portfolio_site_api::{
    entities::project::{NewProject, ProjectStatus, UpdateProjectRequest},
    entities::option_fields::OptionField,
    errors::AppError,
    use_cases::projects::ProjectHandler,
};
use test_project::ProjectFixture;
use test_utils::InMemoryProjectRepo;

const PAGE_SIZE: u32 = 6;

fn handler(projects: Vec<ProjectFixture>) -> ProjectHandler<InMemoryProjectRepo> {
    let rows = projects.into_iter().map(ProjectFixture::build).collect();
    ProjectHandler::new(InMemoryProjectRepo::new(rows), PAGE_SIZE)
}

#[actix_rt::test]
async fn soft_deleted_projects_never_appear_in_listings() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Visible Project"),
        ProjectFixture::new(2, "Hidden Project").featured().soft_deleted(),
    ]);

    let all = handler.get_projects().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].slug, "visible-project");

    let featured = handler.get_featured_projects().await.unwrap();
    assert!(featured.is_empty());

    let by_slug = handler.get_project_by_slug("hidden-project").await.unwrap();
    assert!(by_slug.is_none());
}

#[actix_rt::test]
async fn listings_sort_by_priority_then_recency() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Old Low").priority(0).created_days_ago(10),
        ProjectFixture::new(2, "New Low").priority(0).created_days_ago(1),
        ProjectFixture::new(3, "Old High").priority(5).created_days_ago(30),
    ]);

    let all = handler.get_projects().await.unwrap();
    let ids: Vec<i32> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[actix_rt::test]
async fn category_listing_keeps_display_order() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Second").category("Web Development").priority(1),
        ProjectFixture::new(2, "First").category("Web Development").priority(9),
        ProjectFixture::new(3, "Elsewhere").category("Games").priority(99),
    ]);

    let web = handler.get_projects_by_category("Web Development").await.unwrap();
    let ids: Vec<i32> = web.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[actix_rt::test]
async fn pagination_envelope_matches_total_count() {
    let fixtures: Vec<ProjectFixture> = (1..=8)
        .map(|i| ProjectFixture::new(i, format!("Project {i}")).created_days_ago(i as i64))
        .collect();
    let handler = handler(fixtures);

    let page1 = handler.get_paginated_projects(1, None).await.unwrap();
    assert_eq!(page1.projects.len(), 6);
    assert_eq!(page1.total_count, 8);
    assert_eq!(page1.total_pages, 2);
    assert_eq!(page1.current_page, 1);
    assert!(page1.has_next_page);
    assert!(!page1.has_previous_page);

    let page2 = handler.get_paginated_projects(2, None).await.unwrap();
    assert_eq!(page2.projects.len(), 2);
    assert!(!page2.has_next_page);
    assert!(page2.has_previous_page);

    // No row appears on both pages.
    let page1_ids: Vec<i32> = page1.projects.iter().map(|p| p.id).collect();
    assert!(page2.projects.iter().all(|p| !page1_ids.contains(&p.id)));
}

#[actix_rt::test]
async fn page_zero_clamps_to_first_page() {
    let handler = handler(vec![ProjectFixture::new(1, "Only One")]);

    let page = handler.get_paginated_projects(0, None).await.unwrap();
    assert_eq!(page.current_page, 1);
    assert_eq!(page.projects.len(), 1);
}

#[actix_rt::test]
async fn page_beyond_last_is_empty_but_keeps_count() {
    let handler = handler(vec![ProjectFixture::new(1, "Only One")]);

    let page = handler.get_paginated_projects(5, None).await.unwrap();
    assert!(page.projects.is_empty());
    assert_eq!(page.total_count, 1);
    assert!(!page.has_next_page);
}

#[actix_rt::test]
async fn search_is_case_insensitive_across_fields() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Rust Server"),
        ProjectFixture::new(2, "Photo Album").description("A RUST-flavored gallery"),
        ProjectFixture::new(3, "Sandbox").category("Rust Tools"),
        ProjectFixture::new(4, "Unrelated").description("Nothing here").category("Games"),
    ]);

    let found = handler.get_paginated_projects(1, Some("rust")).await.unwrap();
    assert_eq!(found.total_count, 3);

    let mut ids: Vec<i32> = found.projects.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[actix_rt::test]
async fn blank_search_query_is_ignored() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Alpha"),
        ProjectFixture::new(2, "Beta"),
    ]);

    let page = handler.get_paginated_projects(1, Some("   ")).await.unwrap();
    assert_eq!(page.total_count, 2);
}

#[actix_rt::test]
async fn status_listing_parses_url_friendly_names() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Building").status(ProjectStatus::InProgress),
        ProjectFixture::new(2, "Shipped").status(ProjectStatus::Complete),
    ]);

    let in_progress = handler.get_projects_by_status("in-progress").await.unwrap();
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].id, 1);

    let err = handler.get_projects_by_status("abandoned").await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[actix_rt::test]
async fn stats_cover_only_active_projects() {
    let handler = handler(vec![
        ProjectFixture::new(1, "One").featured().status(ProjectStatus::Complete),
        ProjectFixture::new(2, "Two").status(ProjectStatus::InProgress).category("Games"),
        ProjectFixture::new(3, "Three").status(ProjectStatus::Complete).soft_deleted(),
    ]);

    let stats = handler.get_project_stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.featured, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.categories, 2);
}

#[actix_rt::test]
async fn create_derives_slug_from_title_when_missing() {
    let handler = handler(Vec::new());

    let created = handler
        .create_project(new_project("My Fancy App", None))
        .await
        .unwrap();

    assert_eq!(created.slug, "my-fancy-app");
}

#[actix_rt::test]
async fn create_rejects_duplicate_slug() {
    let handler = handler(vec![ProjectFixture::new(1, "Taken Name")]);

    let err = handler
        .create_project(new_project("Another Title", Some("taken-name")))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[actix_rt::test]
async fn create_rejects_invalid_payload() {
    let handler = handler(Vec::new());

    let mut invalid = new_project("ab", None); // title below minimum
    invalid.demo_url = Some("not-a-url".to_string());

    let err = handler.create_project(invalid).await.unwrap_err();
    let AppError::ValidationError(fields) = err else {
        panic!("expected validation error");
    };
    let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
    assert!(names.contains(&"title"));
    assert!(names.contains(&"demo_url"));
}

#[actix_rt::test]
async fn update_rejects_null_on_required_fields() {
    let handler = handler(vec![ProjectFixture::new(1, "Patchable")]);

    let patch = UpdateProjectRequest {
        title: OptionField::SetToNull,
        ..Default::default()
    };

    let err = handler.update_project(1, &patch).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[actix_rt::test]
async fn update_applies_only_provided_fields() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Patchable").priority(1).long_description("keep me"),
    ]);

    let patch = UpdateProjectRequest {
        priority: OptionField::SetToValue(7),
        ..Default::default()
    };

    let updated = handler.update_project(1, &patch).await.unwrap().unwrap();
    assert_eq!(updated.priority, 7);
    assert_eq!(updated.title, "Patchable");
    assert_eq!(updated.long_description.as_deref(), Some("keep me"));
    assert!(updated.updated_at.is_some());
}

#[actix_rt::test]
async fn update_clears_nullable_field_on_explicit_null() {
    let handler = handler(vec![
        ProjectFixture::new(1, "Patchable").long_description("stale text"),
    ]);

    let patch = UpdateProjectRequest {
        long_description: OptionField::SetToNull,
        ..Default::default()
    };

    let updated = handler.update_project(1, &patch).await.unwrap().unwrap();
    assert!(updated.long_description.is_none());
}

#[actix_rt::test]
async fn soft_delete_hides_project_from_subsequent_reads() {
    let handler = handler(vec![ProjectFixture::new(1, "Doomed")]);

    let deleted = handler.soft_delete_project(1).await.unwrap();
    assert!(deleted.is_some());

    // Second delete is a no-op.
    let again = handler.soft_delete_project(1).await.unwrap();
    assert!(again.is_none());

    assert!(handler.get_project_by_slug("doomed").await.unwrap().is_none());
    assert_eq!(handler.get_projects().await.unwrap().len(), 0);
}

fn new_project(title: &str, slug: Option<&str>) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: "Something worth listing".to_string(),
        long_description: None,
        technologies: vec!["Rust".to_string()],
        status: ProjectStatus::InProgress,
        category: "Web Development".to_string(),
        demo_url: None,
        github_url: None,
        image_url: None,
        thumbnail_url: None,
        screenshots: Vec::new(),
        start_date: None,
        end_date: None,
        featured: false,
        priority: 0,
        slug: slug.map(str::to_string),
        tags: Vec::new(),
        challenges: None,
        learnings: None,
    }
}

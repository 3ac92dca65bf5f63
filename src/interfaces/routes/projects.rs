use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments must register before the `{slug}` catch-all.
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::list_projects))
            )
            .service(
                web::resource("/all")
                    .route(web::get().to(projects::list_all_projects))
            )
            .service(
                web::resource("/featured")
                    .route(web::get().to(projects::list_featured_projects))
            )
            .service(
                web::resource("/stats")
                    .route(web::get().to(projects::get_project_stats))
            )
            .service(
                web::resource("/category/{category}")
                    .route(web::get().to(projects::list_projects_by_category))
            )
            .service(
                web::resource("/status/{status}")
                    .route(web::get().to(projects::list_projects_by_status))
            )
            .service(
                web::resource("/{slug}/comments")
                    .route(web::get().to(crate::handlers::comments::get_comments_for_project))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(projects::get_project_by_slug))
            )
    );
}

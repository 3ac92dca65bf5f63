use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod comments;
mod projects;
mod request_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(projects::config_routes)
            .configure(comments::config_routes)
    );

    cfg.configure(request_error::config_routes);
}

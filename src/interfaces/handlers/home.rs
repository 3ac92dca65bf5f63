use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Portfolio Site API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "projects": "/api/v1/projects",
            "featured": "/api/v1/projects/featured",
            "stats": "/api/v1/projects/stats",
            "health": "/health"
        }
    }))
}

use actix_web::{
    web,
    http::StatusCode,
    ResponseError,
    HttpResponse,
    error::{QueryPayloadError, UrlencodedError},
};
use serde_json::json;

/// Malformed query strings and form payloads come back as JSON error
/// bodies instead of actix's default plain-text responses.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        RequestError::from(err).into()
    }));
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        RequestError::from(err).into()
    }));
}

#[derive(Debug)]
pub struct RequestError {
    message: String,
    status: StatusCode,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<QueryPayloadError> for RequestError {
    fn from(err: QueryPayloadError) -> Self {
        RequestError {
            message: format!("Query string error: {}", err),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

impl From<UrlencodedError> for RequestError {
    fn from(err: UrlencodedError) -> Self {
        RequestError {
            message: format!("Form payload error: {}", err),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};

use crate::{entities::user::CurrentUser, errors::AppError};

/// Extractor for the signed-in user resolved by the session middleware.
/// Returns 401 when no session was attached to the request.
/// Usage: Add `user: SessionUser` as a parameter to your handler function.
#[derive(Debug)]
pub struct SessionUser(pub CurrentUser);

impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(SessionUser(user.clone()))),
            None => ready(Err(AppError::UnauthorizedAccess.into())),
        }
    }
}

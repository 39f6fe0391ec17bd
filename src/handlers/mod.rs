pub mod posts;
pub mod tags;
pub mod users;

use crate::{AppError, flash::take_flash};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::Redirect,
};
use tera::Context;
use tower_cookies::Cookies;

/// A row id taken from the path. Anything that is not an `i32` is answered
/// with 404, the same as an id with no row behind it.
pub struct Id(pub i32);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("page".to_owned()))?;

        raw.parse()
            .map(Id)
            .map_err(|_| AppError::NotFound("page".to_owned()))
    }
}

/// A template context holding the pending flash message, if any.
pub(crate) fn page_context(cookies: &Cookies) -> Context {
    let mut ctx = Context::new();
    if let Some(flash) = take_flash(cookies) {
        ctx.insert("flash", &flash);
    }
    ctx
}

pub async fn root() -> Redirect {
    Redirect::to("/users")
}

pub async fn not_found() -> AppError {
    AppError::NotFound("page".to_owned())
}

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use blogly_service::ServiceError;
use sea_orm::DbErr;
use tracing::error;

/// An error raised while handling a request
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The addressed row or page does not exist
    #[error("{0} not found")]
    NotFound(String),
    /// A required form field was absent from the request body
    #[error("missing form field `{0}`")]
    MissingField(&'static str),
    /// A database failure, constraint violations included
    #[error(transparent)]
    Service(ServiceError),
    /// A template failed to render
    #[error(transparent)]
    Template(#[from] tera::Error),
}

impl AppError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} {id}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { entity, id } => Self::not_found(entity, id),
            err => Self::Service(err),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Service(ServiceError::Db(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, "{}", self);
        }

        let body = match &self {
            Self::NotFound(what) => format!(
                "<!doctype html><html><head><title>Not Found</title>\
                 <link rel=\"stylesheet\" href=\"/static/style.css\"></head>\
                 <body><main><h1>Not Found</h1><p>Sorry, {what} could not be found.</p>\
                 <p><a href=\"/users\">Back to users</a></p></main></body></html>"
            ),
            Self::MissingField(field) => format!("Missing form field: {field}"),
            _ => "Internal Server Error".to_owned(),
        };

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_not_found_maps_to_404() {
        let err = AppError::from(ServiceError::not_found("post", 3));

        assert_eq!(err.to_string(), "post 3 not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_failures_map_to_500() {
        let err = AppError::from(DbErr::Custom("boom".to_owned()));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::MissingField("title").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}

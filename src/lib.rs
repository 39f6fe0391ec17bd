//! Blogly: users, their posts and the tags on those posts, served as HTML
//! pages over axum with SeaORM underneath.
//!
//! [`app`] builds the router over an [`AppState`]; [`start`] connects to the
//! database, runs the migrations and serves it.

mod config;
pub mod error;
mod flash;
mod form;
mod handlers;
mod views;

pub use config::Config;
pub use error::AppError;

use axum::{
    Router,
    response::Html,
    routing::{get, post},
};
use handlers::{posts, tags, users};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use tera::{Context, Tera};
use tokio::net::TcpListener;
use tower_cookies::CookieManagerLayer;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, templates: Tera) -> Self {
        Self {
            conn,
            templates: Arc::new(templates),
        }
    }

    pub(crate) fn render(&self, template: &str, ctx: &Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.templates.render(template, ctx)?))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/users", get(users::list))
        .route("/users/add_user", get(users::new_form).post(users::create))
        .route("/users/{id}", get(users::show))
        .route("/users/{id}/edit", get(users::edit_form).post(users::update))
        .route("/users/{id}/delete", get(users::delete).post(users::delete))
        .route(
            "/users/{id}/posts/new",
            get(posts::new_form).post(posts::create),
        )
        .route("/posts/{id}", get(posts::show))
        .route("/posts/{id}/edit", get(posts::edit_form).post(posts::update))
        .route("/posts/{id}/delete", post(posts::delete))
        .route("/tags", get(tags::list))
        .route("/tags/new", get(tags::new_form).post(tags::create))
        .route("/tags/{id}", get(tags::show))
        .route("/tags/{id}/edit", get(tags::edit_form).post(tags::update))
        .route("/tags/{id}/delete", post(tags::delete))
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .fallback(handlers::not_found)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Installs the global subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("blogly=debug,blogly_service=debug,tower_http=debug"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let conn = Database::connect(config.connect_options()).await?;
    Migrator::up(&conn, None).await?;

    let templates = Tera::new(&config.templates)?;
    let state = AppState::new(conn, templates);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;

    Ok(())
}

use crate::config::db::DB;
use crate::config::AppConfig;
use crate::errors::{PAGE_404, PAGE_500};
use crate::route::post_page;
use crate::service::listing_service::ListingPlanner;
use anyhow::Context;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

pub mod config;
pub mod errors;
pub mod model;
pub mod route;
pub mod service;
pub mod util;

// Application state shared across handlers
// Cloning AppState is cheap, the config and the connection pool sit behind Arc.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Arc<DB>,
    pub planner: ListingPlanner,
}

// Application router creation
// Note: The order of layers is important.
pub async fn create_app(state: AppState) -> Router {
    let config = &state.config;

    let static_route = Router::new().nest_service(
        &config.static_url,
        ServeDir::new(config.static_path.clone()).not_found_service(handle_404.into_service()),
    );

    let mut app = Router::new()
        .merge(post_page::create_routes())
        .merge(static_route)
        .fallback(handle_404)
        .method_not_allowed_fallback(handle_405)
        .layer(ServiceBuilder::new().layer(CatchPanicLayer::custom(handle_panic)));

    if config.log.log_requests {
        app = app.layer(TraceLayer::new_for_http());
    }
    app.with_state(state)
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let db = DB::new(&config.db.url, config.db.pool_size)
            .await
            .context("Cannot connect to database")?;

        Ok(AppState::with_db(config, db))
    }

    pub fn with_db(config: AppConfig, db: DB) -> Self {
        let planner = ListingPlanner::new(config.posts_per_page, config.max_posts_per_page);

        AppState {
            config: Arc::new(config),
            db: Arc::new(db),
            planner,
        }
    }
}

pub async fn handle_404() -> Response {
    (StatusCode::NOT_FOUND, Html(PAGE_404)).into_response()
}

async fn handle_405() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
}

// Custom panic handler, logs the panic and returns a 500 response
fn handle_panic(panic: Box<dyn std::any::Any + Send>) -> Response {
    let panic_message = if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "Unknown panic"
    };

    error!("App panicked: {}", panic_message);
    (StatusCode::INTERNAL_SERVER_ERROR, Html(PAGE_500)).into_response()
}

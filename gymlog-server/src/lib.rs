//! HTTP JSON front-end for the gymlog tracker.

pub mod config;
pub mod error;
pub mod extract;
mod handlers;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{Next, from_fn};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, delete, get, post, put};
use gymlog::Tracker;
use gymlog::dataset::{self, DatasetSource, ImportSummary};
use log::{info, warn};
use std::path::PathBuf;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Commit batch size used when seeding at startup.
const SEED_BATCH_SIZE: usize = 200;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Tracker,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        AppState { tracker }
    }
}

/// Run a blocking tracker call off the async runtime.
pub(crate) async fn run<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Tracker) -> gymlog::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let tracker = state.tracker.clone();
    tokio::task::spawn_blocking(move || f(&tracker))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::from)
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me).put(handlers::auth::update_me))
        .route(
            "/exercises",
            get(handlers::exercises::list).post(handlers::exercises::create),
        )
        .route("/exercises/{id}", get(handlers::exercises::get_one))
        .route("/muscle-groups", get(handlers::exercises::muscle_groups))
        .route("/equipment", get(handlers::exercises::equipment))
        .route("/workouts", post(handlers::workouts::start))
        .route("/workouts/active", get(handlers::workouts::active))
        .route(
            "/workouts/{id}",
            get(handlers::workouts::get_one)
                .put(handlers::workouts::finish)
                .patch(handlers::workouts::edit),
        )
        .route(
            "/workouts/{id}/exercises",
            post(handlers::workouts::add_exercise),
        )
        .route(
            "/workout-exercises/{id}",
            delete(handlers::workouts::remove_exercise),
        )
        .route("/workout-exercises/{id}/sets", post(handlers::sets::add))
        .route(
            "/sets/{id}",
            put(handlers::sets::update)
                .patch(handlers::sets::update)
                .delete(handlers::sets::remove),
        )
        .route("/users/{id}/workouts", get(handlers::workouts::for_user))
        .route(
            "/users/{id}/personal-records",
            get(handlers::records::for_user),
        )
        .route("/personal-records", post(handlers::records::create))
        .route("/_deprecated/{*rest}", any(handlers::deprecated::gone));

    Router::new()
        .nest("/api", api)
        .layer(from_fn(cors_middleware))
        .with_state(state)
}

fn stamp_cors(headers: &mut HeaderMap) {
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type,authorization"),
    );
}

async fn cors_middleware(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        stamp_cors(resp.headers_mut());
        return resp;
    }
    let mut resp = next.run(req).await;
    stamp_cors(resp.headers_mut());
    resp
}

/// Startup seeding: development defaults and, when the catalog is empty, the vendored
/// dataset. Seeding failures are logged and do not stop the server.
pub async fn bootstrap(tracker: &Tracker, config: &ServerConfig) -> anyhow::Result<()> {
    if config.seed_dev_data {
        let pool = tracker.pool().clone();
        let seeded = tokio::task::spawn_blocking(move || -> anyhow::Result<usize> {
            let mut conn = pool.get()?;
            Ok(dataset::seed::seed_dev_defaults(&mut conn)?)
        })
        .await??;
        info!("Development seed added {} exercises", seeded);
    }

    if config.auto_seed_if_empty {
        if let Err(e) = auto_seed(tracker, config.dataset_path.clone()).await {
            warn!("Auto-seed failed: {:#}", e);
        }
    }
    Ok(())
}

/// Import the dataset into an empty catalog. A populated catalog returns `None` without
/// touching the dataset file.
pub async fn auto_seed(
    tracker: &Tracker,
    dataset_path: Option<PathBuf>,
) -> anyhow::Result<Option<ImportSummary>> {
    let pool = tracker.pool().clone();
    let check_pool = pool.clone();
    let empty = tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
        let mut conn = check_pool.get()?;
        Ok(dataset::seed::catalog_is_empty(&mut conn)?)
    })
    .await??;
    if !empty {
        return Ok(None);
    }

    let records = DatasetSource::default()
        .load(dataset_path.as_deref(), false)
        .await?;
    let summary = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        let mut conn = pool.get()?;
        Ok(dataset::seed::seed_if_empty(&mut conn, &records, SEED_BATCH_SIZE)?)
    })
    .await??;
    if let Some(summary) = &summary {
        info!(
            "Auto-seeded exercise catalog: inserted {}, skipped {}, updated difficulty {}",
            summary.inserted, summary.skipped_duplicate, summary.updated_difficulty
        );
    }
    Ok(summary)
}

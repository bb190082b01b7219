//! Read-only viewer for scraped cases
//!
//! Serves the case file written by the crawler:
//! - `GET /api/cases` returns every record
//! - `GET /api/case/:index` returns one record by position, or 404
//! - anything else is served from the static web directory
//!
//! The case file is re-read on every request, so a fresh scrape shows up
//! without restarting the server.

use crate::config::ViewerConfig;
use crate::output::load_cases;
use crate::record::CaseRecord;
use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Application state shared by the request handlers
#[derive(Clone)]
struct AppState {
    cases_path: Arc<PathBuf>,
}

/// Builds the viewer router
///
/// # Arguments
///
/// * `cases_path` - JSON file holding the case records
/// * `static_dir` - Directory of static files for the web front-end
pub fn router(cases_path: impl Into<PathBuf>, static_dir: impl AsRef<Path>) -> Router {
    let state = AppState {
        cases_path: Arc::new(cases_path.into()),
    };

    Router::new()
        .route("/api/cases", get(list_cases))
        .route("/api/case/:index", get(get_case))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the viewer until the process is stopped
///
/// # Errors
///
/// Returns an error if the address cannot be parsed or bound, or the server
/// fails while running.
pub async fn serve(config: &ViewerConfig, cases_path: &Path) -> std::io::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    if !cases_path.exists() {
        tracing::warn!(
            "No scraped data at {}; run a full scrape first",
            cases_path.display()
        );
    }

    let app = router(cases_path, &config.static_dir);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Viewer running at http://{}", addr);
    axum::serve(listener, app).await
}

async fn list_cases(State(state): State<AppState>) -> Json<Vec<CaseRecord>> {
    Json(load_cases(&state.cases_path))
}

/// An index that is not a non-negative integer is treated like one out of range
async fn get_case(
    State(state): State<AppState>,
    AxumPath(index): AxumPath<String>,
) -> Result<Json<CaseRecord>, (StatusCode, Json<Value>)> {
    index
        .parse::<usize>()
        .ok()
        .and_then(|index| load_cases(&state.cases_path).into_iter().nth(index))
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Case not found" })),
            )
        })
}

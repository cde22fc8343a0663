//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::catalog::LookupError;
use crate::domain::Stop;
use crate::matcher::{DirectQuery, DirectRouteMatcher, DirectRouteReport, MatchError, RouteOutcome};
use crate::render::RenderError;

use super::dto::*;
use super::state::AppState;

/// Index page with the query form.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let maps_dir = state.renderer.output_dir().to_path_buf();
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stops/candidates", get(stop_candidates))
        .route("/api/direct", get(direct_routes))
        .nest_service("/maps", ServeDir::new(maps_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Step one of disambiguation: enumerate the candidate stop poles for
/// a display name. The caller picks one by its 1-based number.
async fn stop_candidates(
    State(state): State<AppState>,
    Query(req): Query<StopCandidatesRequest>,
) -> Result<Json<StopCandidatesResponse>, AppError> {
    let candidates = state.catalog.candidates(&req.name)?;

    Ok(Json(StopCandidatesResponse {
        name: req.name.trim().to_string(),
        candidates: candidates
            .iter()
            .enumerate()
            .map(|(i, stop)| CandidateResult::from_stop(i + 1, stop))
            .collect(),
    }))
}

/// Run one direct-route query: resolve both names, match, render one
/// map artifact per valid match.
async fn direct_routes(
    State(state): State<AppState>,
    Query(req): Query<DirectRouteRequest>,
) -> Result<Json<DirectRouteResponse>, AppError> {
    let origin = pick_stop(&state, &req.origin, req.origin_choice)?;
    let destination = pick_stop(&state, &req.destination, req.destination_choice)?;

    let query = DirectQuery {
        origin_id: origin.id.clone(),
        destination_id: destination.id.clone(),
        origin_name: origin.name.clone(),
        destination_name: destination.name.clone(),
    };

    let matcher = DirectRouteMatcher::new(state.ebus.as_ref(), state.codes.as_ref());
    let report = matcher.find_direct_routes(&query).await?;

    let mut routes = Vec::with_capacity(report.outcomes().len());
    for outcome in report.outcomes() {
        // A render failure degrades that entry to map_url: None rather
        // than failing the whole query.
        let map_url = match outcome {
            RouteOutcome::Match(m) => match state.renderer.render(m) {
                Ok(path) => path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| format!("/maps/{n}")),
                Err(e) => {
                    warn!(route = %m.route, error = %e, "failed to render segment map");
                    None
                }
            },
            _ => None,
        };
        routes.push(RouteOutcomeResult::from_outcome(outcome, map_url));
    }

    Ok(Json(DirectRouteResponse {
        origin: origin.name.clone(),
        origin_stop_id: origin.id.to_string(),
        destination: destination.name.clone(),
        destination_stop_id: destination.id.to_string(),
        direct: !matches!(report, DirectRouteReport::NoDirectRoute),
        routes,
    }))
}

/// Resolve a stop name to exactly one pole.
///
/// A sole candidate is taken implicitly; an ambiguous name requires an
/// explicit 1-based choice from the candidate listing.
fn pick_stop<'a>(
    state: &'a AppState,
    name: &str,
    choice: Option<usize>,
) -> Result<&'a Stop, AppError> {
    match choice {
        Some(c) => Ok(state.catalog.select(name, c)?),
        None => {
            let candidates = state.catalog.candidates(name)?;
            if candidates.len() > 1 {
                return Err(AppError::BadRequest {
                    message: format!(
                        "stop name {:?} has {} candidate poles; pass a 1-based choice (see /api/stops/candidates)",
                        name.trim(),
                        candidates.len()
                    ),
                });
            }
            Ok(&candidates[0])
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::UnknownStopName(_) => AppError::NotFound {
                message: e.to_string(),
            },
            LookupError::ChoiceOutOfRange { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(%status, message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_errors_map_to_http_semantics() {
        let err: AppError = LookupError::UnknownStopName("某站".to_string()).into();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err: AppError = LookupError::ChoiceOutOfRange {
            choice: 9,
            count: 3,
        }
        .into();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}

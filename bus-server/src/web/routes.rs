//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::resolve::{Resolution, ResolveError, SearchOutcome};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes", get(list_routes))
        .route("/api/route/resolve", post(resolve_route))
        .route("/api/route/current", get(current_route))
        .route("/api/route/clear", post(clear_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Errors surfaced by the web layer.
#[derive(Debug)]
pub enum AppError {
    /// Caller error (missing input)
    BadRequest { message: String },
    /// The suggestion collaborator failed
    Upstream { message: String },
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::MissingInput { .. } => AppError::BadRequest {
                message: err.to_string(),
            },
            ResolveError::Suggest(_) => AppError::Upstream {
                message: "Could not get route suggestions.".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the route catalog.
async fn list_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let routes = state
        .planner
        .catalog()
        .routes()
        .iter()
        .map(RouteInfo::from)
        .collect();

    Json(RoutesResponse { routes })
}

/// Resolve a route between two endpoints.
async fn resolve_route(
    State(state): State<AppState>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    let token = state.session.begin().await;

    match state.planner.resolve(&req.origin, &req.destination).await {
        Ok(Resolution::Resolved { route, alternates }) => {
            state
                .session
                .complete(token, SearchOutcome::Resolved(route.clone()))
                .await;

            Ok(Json(ResolveResponse {
                status: "resolved",
                route: Some(RouteResult::from(&route)),
                alternates: alternates.iter().map(AlternateResult::from).collect(),
            }))
        }
        Ok(Resolution::NotFound) => {
            state.session.complete(token, SearchOutcome::NotFound).await;

            Ok(Json(ResolveResponse {
                status: "notFound",
                route: None,
                alternates: Vec::new(),
            }))
        }
        Err(err @ ResolveError::MissingInput { .. }) => {
            // The search never really started; don't leave a Failed state
            // behind for a local validation error.
            state.session.abandon(token).await;
            Err(AppError::from(err))
        }
        Err(err) => {
            tracing::warn!(error = %err, "route resolution failed");
            state
                .session
                .complete(token, SearchOutcome::Failed(err.to_string()))
                .await;
            Err(AppError::from(err))
        }
    }
}

/// Read the session's current state and displayed route.
async fn current_route(State(state): State<AppState>) -> Json<CurrentRouteResponse> {
    let search_state = state.session.state().await;
    Json(CurrentRouteResponse::from(&search_state))
}

/// Clear the displayed route and return the session to idle.
async fn clear_route(State(state): State<AppState>) -> StatusCode {
    state.session.clear().await;
    StatusCode::NO_CONTENT
}

//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::domain::{City, ScheduleResult, State as Region};
use crate::resolve::LookupError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/state", get(list_states))
        .route("/city", get(list_cities))
        .route("/imsyakiyah", get(get_imsyakiyah))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List states, optionally filtered by name.
async fn list_states(
    State(state): State<AppState>,
    Query(req): Query<StateQuery>,
) -> Result<Json<ListResponse<Region>>, AppError> {
    let states = state.regions.list_states(req.search.as_deref())?;
    Ok(Json(ListResponse::success(states)))
}

/// List the cities of a state, optionally filtered by name.
async fn list_cities(
    State(state): State<AppState>,
    Query(req): Query<CityQuery>,
) -> Result<Json<ListResponse<City>>, AppError> {
    let cities = state
        .cities
        .list_cities(req.state_id, req.search.as_deref())
        .await?;
    Ok(Json(ListResponse::success(cities)))
}

/// Schedule for a city and year, or a single day of it.
async fn get_imsyakiyah(
    State(state): State<AppState>,
    Query(req): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResult>, AppError> {
    let schedule = state
        .schedules
        .get_schedule(req.state_id, req.city_id, &req.year, req.date.as_deref())
        .await?;
    Ok(Json(schedule))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Internal { message: String },
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::StateNotFound | LookupError::CityNotFound | LookupError::DataNotFound => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => {
                error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

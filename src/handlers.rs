use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::path::Path as FsPath;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::components::event_store::{Event, EventPayload};
use crate::error::{AppResult, Error};
use crate::service::EventService;

/// Shared state for the request handlers
#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
}

impl AppState {
    pub fn new(events: EventService) -> Self {
        Self { events }
    }
}

/// Success envelope used by list, get and create
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Error body returned for every failure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl Error {
    /// HTTP status reported for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::Mismatch(_) | Error::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let body = Json(ErrorResponse {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

/// Event API routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event", get(list_events).post(create_event))
        .route(
            "/event/{event_id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

/// Full application: API, static calendar page and middleware
pub fn app(state: AppState, static_dir: &FsPath) -> Router {
    router()
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /event - List all events
async fn list_events(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = state.events.list().await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /event/{event_id} - Get one event
async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = state.events.get(&event_id).await?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /event - Create an event and return its id
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> AppResult<Json<DataResponse<i64>>> {
    let Json(payload) = payload?;
    let id = state.events.create(payload).await?;
    Ok(Json(DataResponse { data: id }))
}

/// PUT /event/{event_id} - Overwrite an event, echoing the path id
async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> AppResult<Json<String>> {
    let Json(payload) = payload?;
    state.events.update(&event_id, payload).await?;
    info!("Event {} updated", event_id);
    Ok(Json(event_id))
}

/// DELETE /event/{event_id} - Remove an event, echoing the path id
async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<String>> {
    state.events.delete(&event_id).await?;
    Ok(Json(event_id))
}

//! JSON REST handlers for lights.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use lumina_app::decision::LightEvent;
use lumina_app::registry::LightSummary;
use lumina_domain::input::InputEvent;
use lumina_domain::schedule::ScheduleTrigger;
use lumina_domain::status::LightStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// A light and its latest status snapshot.
#[derive(Debug, Serialize)]
pub struct LightView {
    pub name: String,
    pub status: LightStatus,
}

impl From<LightSummary> for LightView {
    fn from(summary: LightSummary) -> Self {
        Self {
            name: summary.name,
            status: summary.status,
        }
    }
}

/// A field that keeps its value when it has the expected type and is
/// otherwise swallowed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

impl<T> Lenient<T> {
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

/// Request body of an input event, in the controllers' native shape.
///
/// `event` accepts the normalized kind names as well as the native ones
/// (`single_push`, `btn_up`, …); `toggle` uses `state` to tell an occupancy
/// start from its end. Unknown or mistyped events are accepted and ignored,
/// and an id outside `0..=255` binds to no input.
#[derive(Debug, Deserialize)]
pub struct InputRequest {
    #[serde(alias = "input_id")]
    pub id: Lenient<u8>,
    #[serde(default)]
    pub event: Option<Lenient<String>>,
    #[serde(default)]
    pub state: Option<Lenient<bool>>,
}

impl InputRequest {
    /// The normalized event, or `None` when the id names no input.
    #[must_use]
    pub fn into_event(self) -> Option<InputEvent> {
        let id = self.id.into_option()?;
        let event = self.event.and_then(Lenient::into_option);
        let state = self.state.and_then(Lenient::into_option);
        Some(InputEvent::from_native(id, event.as_deref(), state))
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<LightView>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<LightView>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the event endpoints.
pub enum EventResponse {
    Accepted,
}

impl IntoResponse for EventResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => StatusCode::ACCEPTED.into_response(),
        }
    }
}

/// `GET /api/lights`
pub async fn list(State(state): State<AppState>) -> ListResponse {
    let lights = state
        .registry
        .summaries()
        .into_iter()
        .map(LightView::from)
        .collect();
    ListResponse::Ok(Json(lights))
}

/// `GET /api/lights/{name}`
pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<GetResponse, ApiError> {
    let status = state.registry.status(&name)?;
    Ok(GetResponse::Ok(Json(LightView { name, status })))
}

/// `POST /api/lights/{name}/input`
pub async fn input(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<InputRequest>,
) -> Result<EventResponse, ApiError> {
    let Some(event) = req.into_event() else {
        state.registry.status(&name)?;
        tracing::debug!(light = %name, "input id out of range ignored");
        return Ok(EventResponse::Accepted);
    };
    state
        .registry
        .deliver(&name, LightEvent::Input(event))
        .await?;
    Ok(EventResponse::Accepted)
}

/// `GET|POST /api/lights/{name}/schedule/{tag}`
pub async fn schedule(
    State(state): State<AppState>,
    Path((name, tag)): Path<(String, String)>,
) -> Result<EventResponse, ApiError> {
    let Ok(trigger) = tag.parse::<ScheduleTrigger>() else {
        state.registry.status(&name)?;
        tracing::debug!(light = %name, %tag, "unknown schedule trigger ignored");
        return Ok(EventResponse::Accepted);
    };
    tracing::info!(light = %name, %trigger, "schedule callback received");
    state
        .registry
        .deliver(&name, LightEvent::Schedule(trigger))
        .await?;
    Ok(EventResponse::Accepted)
}

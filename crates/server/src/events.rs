//! Event API endpoints

use api_types::event::Event;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for the current event
pub async fn get(State(state): State<ServerState>) -> Result<Json<Event>, ServerError> {
    let event = state.engine.first_event().await?;

    Ok(Json(Event {
        id: event.id,
        title: event.title,
        background_image_url: event.background_image_url,
        logo_image_url: event.logo_image_url,
        starts_at: event.starts_at,
        ends_at: event.ends_at,
    }))
}

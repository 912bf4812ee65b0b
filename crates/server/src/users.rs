//! User API endpoints

use api_types::user::{User, UserNew, UserNewQuery};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    extract::{Payload, QueryParams},
    server::ServerState,
};

/// Handle requests for creating new users
pub async fn create(
    State(state): State<ServerState>,
    QueryParams(query): QueryParams<UserNewQuery>,
    Payload(payload): Payload<UserNew>,
) -> Result<(StatusCode, Json<User>), ServerError> {
    let user = state
        .engine
        .create_user(&payload.email, &payload.password, query.event_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(User {
            id: user.id,
            email: user.email,
        }),
    ))
}

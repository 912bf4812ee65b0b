//! Authentication endpoints

use api_types::{
    auth::{Session, SignIn},
    user::User,
};
use axum::{Json, extract::State};

use crate::{ServerError, extract::Payload, server::ServerState};

pub async fn sign_in(
    State(state): State<ServerState>,
    Payload(payload): Payload<SignIn>,
) -> Result<Json<Session>, ServerError> {
    let signed = state
        .engine
        .sign_in(&payload.email, &payload.password)
        .await?;

    Ok(Json(Session {
        user: User {
            id: signed.user.id,
            email: signed.user.email,
        },
        token: signed.token,
    }))
}

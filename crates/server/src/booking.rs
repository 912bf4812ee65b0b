//! Booking API endpoints

use api_types::booking::{Booking, BookingId, BookingRoom};
use axum::{Extension, Json, extract::State};

use crate::{
    ServerError,
    extract::{PathParam, Payload},
    hotels::room_view,
    server::{AuthUser, ServerState},
};

pub async fn get(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Booking>, ServerError> {
    let booking = state.engine.booking_for_user(user_id).await?;
    Ok(Json(Booking {
        id: booking.id,
        room: room_view(booking.room),
    }))
}

pub async fn create(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Payload(payload): Payload<BookingRoom>,
) -> Result<Json<BookingId>, ServerError> {
    let booking_id = state.engine.book_room(user_id, payload.room_id).await?;
    Ok(Json(BookingId { booking_id }))
}

/// Move the caller's booking to another room.
pub async fn change(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    PathParam(booking_id): PathParam<i32>,
    Payload(payload): Payload<BookingRoom>,
) -> Result<Json<BookingId>, ServerError> {
    let booking_id = state
        .engine
        .change_booking(user_id, booking_id, payload.room_id)
        .await?;
    Ok(Json(BookingId { booking_id }))
}

pub async fn cancel(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    PathParam(booking_id): PathParam<i32>,
) -> Result<Json<BookingId>, ServerError> {
    let booking_id = state.engine.cancel_booking(user_id, booking_id).await?;
    Ok(Json(BookingId { booking_id }))
}

//! Hotel API endpoints

use api_types::hotel::{Hotel, HotelWithRooms, Room};
use axum::{Extension, Json, extract::State};

use crate::{
    ServerError,
    extract::PathParam,
    server::{AuthUser, ServerState},
};

pub(crate) fn room_view(room: engine::Room) -> Room {
    Room {
        id: room.id,
        name: room.name,
        capacity: room.capacity,
        hotel_id: room.hotel_id,
        created_at: room.created_at,
        updated_at: room.updated_at,
    }
}

pub async fn list(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Hotel>>, ServerError> {
    let hotels = state
        .engine
        .list_hotels(user_id)
        .await?
        .into_iter()
        .map(|hotel| Hotel {
            id: hotel.id,
            name: hotel.name,
            image: hotel.image,
            created_at: hotel.created_at,
            updated_at: hotel.updated_at,
        })
        .collect();
    Ok(Json(hotels))
}

pub async fn get(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    PathParam(hotel_id): PathParam<i32>,
) -> Result<Json<HotelWithRooms>, ServerError> {
    let found = state.engine.hotel_with_rooms(user_id, hotel_id).await?;
    let hotel = found.hotel;

    Ok(Json(HotelWithRooms {
        id: hotel.id,
        name: hotel.name,
        image: hotel.image,
        created_at: hotel.created_at,
        updated_at: hotel.updated_at,
        rooms: found.rooms.into_iter().map(room_view).collect(),
    }))
}

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Hotel, ResultEngine, Room, hotels, rooms, validation};

use super::{Engine, with_tx};

/// A hotel with all of its rooms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HotelWithRooms {
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}

impl Engine {
    /// List hotels. Requires a paid in-person ticket that includes hotel.
    pub async fn list_hotels(&self, user_id: i32) -> ResultEngine<Vec<Hotel>> {
        with_tx!(self, |db_tx| {
            self.lodging_of(&db_tx, user_id)
                .await?
                .require_hotel_access()?;

            let hotels: Vec<Hotel> = hotels::Entity::find()
                .order_by_asc(hotels::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Hotel::from)
                .collect();
            if hotels.is_empty() {
                return Err(EngineError::KeyNotFound("hotels".to_string()));
            }
            Ok(hotels)
        })
    }

    pub async fn hotel_with_rooms(
        &self,
        user_id: i32,
        hotel_id: i32,
    ) -> ResultEngine<HotelWithRooms> {
        validation::positive_id(hotel_id, "hotelId")?;

        with_tx!(self, |db_tx| {
            self.lodging_of(&db_tx, user_id)
                .await?
                .require_hotel_access()?;

            let hotel: Hotel = hotels::Entity::find_by_id(hotel_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("hotel".to_string()))?
                .into();
            let rooms = rooms::Entity::find()
                .filter(rooms::Column::HotelId.eq(hotel_id))
                .order_by_asc(rooms::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Room::from)
                .collect();

            Ok(HotelWithRooms { hotel, rooms })
        })
    }

    pub async fn create_hotel(&self, name: &str, image: &str) -> ResultEngine<Hotel> {
        let name = validation::required_text(name, "name")?;
        let image = validation::required_text(image, "image")?;

        with_tx!(self, |db_tx| {
            let now = Utc::now();
            let model = hotels::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                image: ActiveValue::Set(image),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(hotel_id = model.id, "hotel created");
            Ok(model.into())
        })
    }

    pub async fn create_room(&self, hotel_id: i32, name: &str, capacity: i32) -> ResultEngine<Room> {
        let name = validation::required_text(name, "name")?;
        if capacity <= 0 {
            return Err(EngineError::InvalidInput(
                "capacity must be positive".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            if hotels::Entity::find_by_id(hotel_id)
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Err(EngineError::KeyNotFound("hotel".to_string()));
            }

            let now = Utc::now();
            let model = rooms::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                capacity: ActiveValue::Set(capacity),
                hotel_id: ActiveValue::Set(hotel_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(hotel_id, room_id = model.id, "room created");
            Ok(model.into())
        })
    }
}

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{Booking, EngineError, ResultEngine, Room, bookings, rooms, validation};

use super::{Engine, with_tx};

impl Engine {
    /// Return the booking of `user_id` with its room.
    pub async fn booking_for_user(&self, user_id: i32) -> ResultEngine<Booking> {
        with_tx!(self, |db_tx| {
            let (booking, room) = bookings::Entity::find()
                .filter(bookings::Column::UserId.eq(user_id))
                .find_also_related(rooms::Entity)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("booking".to_string()))?;
            let room = room.ok_or_else(|| EngineError::KeyNotFound("room".to_string()))?;
            Ok(Booking::from((booking, Room::from(room))))
        })
    }

    /// Book `room_id` for `user_id` and return the booking id.
    ///
    /// The vacancy check and the insert share one transaction, so a room
    /// never ends up with more bookings than its capacity.
    pub async fn book_room(&self, user_id: i32, room_id: i32) -> ResultEngine<i32> {
        validation::positive_id(room_id, "roomId")?;

        with_tx!(self, |db_tx| {
            self.lodging_of(&db_tx, user_id)
                .await?
                .require_booking_access()?;
            let room = self.require_room_with_vacancy(&db_tx, room_id).await?;

            let already_booked = bookings::Entity::find()
                .filter(bookings::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?
                .is_some();
            if already_booked {
                return Err(EngineError::CannotBook(
                    "user already holds a booking".to_string(),
                ));
            }

            let now = Utc::now();
            let model = bookings::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id),
                room_id: ActiveValue::Set(room.id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id, room_id, booking_id = model.id, "room booked");
            Ok(model.id)
        })
    }

    /// Move the booking `booking_id` of `user_id` to `room_id`.
    pub async fn change_booking(
        &self,
        user_id: i32,
        booking_id: i32,
        room_id: i32,
    ) -> ResultEngine<i32> {
        validation::positive_id(booking_id, "bookingId")?;
        validation::positive_id(room_id, "roomId")?;

        with_tx!(self, |db_tx| {
            let current = bookings::Entity::find()
                .filter(bookings::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;
            if current
                .as_ref()
                .is_some_and(|b| b.id == booking_id && b.room_id == room_id)
            {
                return Ok(booking_id);
            }

            let room = self.require_room_with_vacancy(&db_tx, room_id).await?;

            let booking = match current {
                Some(booking) if booking.id == booking_id => booking,
                _ => {
                    return Err(EngineError::CannotBook(
                        "booking does not belong to the user".to_string(),
                    ));
                }
            };

            let mut model: bookings::ActiveModel = booking.into();
            model.room_id = ActiveValue::Set(room.id);
            model.updated_at = ActiveValue::Set(Utc::now());
            let model = model.update(&db_tx).await?;

            tracing::info!(user_id, room_id, booking_id = model.id, "booking moved");
            Ok(model.id)
        })
    }

    /// Cancel the booking `booking_id`, which must belong to `user_id`.
    pub async fn cancel_booking(&self, user_id: i32, booking_id: i32) -> ResultEngine<i32> {
        validation::positive_id(booking_id, "bookingId")?;

        with_tx!(self, |db_tx| {
            let booking = bookings::Entity::find_by_id(booking_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("booking".to_string()))?;
            if booking.user_id != user_id {
                return Err(EngineError::CannotBook(
                    "booking does not belong to the user".to_string(),
                ));
            }

            bookings::Entity::delete_by_id(booking.id)
                .exec(&db_tx)
                .await?;

            tracing::info!(user_id, booking_id, "booking cancelled");
            Ok(booking_id)
        })
    }
}

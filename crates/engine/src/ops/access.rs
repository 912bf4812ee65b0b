use sea_orm::{DatabaseTransaction, PaginatorTrait, QueryFilter, prelude::*};

use crate::{
    EngineError, ResultEngine, Room, TicketType, bookings, enrollments, rooms, ticket_types,
    tickets,
};

use super::Engine;

/// Where a user stands with respect to hotel lodging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Lodging {
    NoEnrollment,
    NoTicket,
    Unpaid,
    WithoutHotel,
    Granted,
}

impl Lodging {
    fn of(ticket: &tickets::Model, ticket_type: &TicketType) -> Self {
        if ticket.status != crate::TicketStatus::Paid {
            Self::Unpaid
        } else if !ticket_type.grants_lodging() {
            Self::WithoutHotel
        } else {
            Self::Granted
        }
    }

    /// Hotel browsing: missing records are 404s, anything short of a paid
    /// in-person ticket with hotel asks for payment.
    pub(super) fn require_hotel_access(self) -> ResultEngine<()> {
        match self {
            Self::NoEnrollment => Err(EngineError::KeyNotFound("enrollment".to_string())),
            Self::NoTicket => Err(EngineError::KeyNotFound("ticket".to_string())),
            Self::Unpaid => Err(EngineError::PaymentRequired(
                "ticket is not paid".to_string(),
            )),
            Self::WithoutHotel => Err(EngineError::PaymentRequired(
                "ticket does not include hotel".to_string(),
            )),
            Self::Granted => Ok(()),
        }
    }

    /// Booking: every shortfall is a refusal.
    pub(super) fn require_booking_access(self) -> ResultEngine<()> {
        let reason = match self {
            Self::NoEnrollment => "user has no enrollment",
            Self::NoTicket => "user has no ticket",
            Self::Unpaid => "ticket is not paid",
            Self::WithoutHotel => "ticket does not include hotel",
            Self::Granted => return Ok(()),
        };
        Err(EngineError::CannotBook(reason.to_string()))
    }
}

impl Engine {
    pub(super) async fn enrollment_of(
        &self,
        db: &DatabaseTransaction,
        user_id: i32,
    ) -> ResultEngine<Option<enrollments::Model>> {
        enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .one(db)
            .await
            .map_err(Into::into)
    }

    pub(super) async fn require_enrollment(
        &self,
        db: &DatabaseTransaction,
        user_id: i32,
    ) -> ResultEngine<enrollments::Model> {
        self.enrollment_of(db, user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("enrollment".to_string()))
    }

    pub(super) async fn ticket_of_enrollment(
        &self,
        db: &DatabaseTransaction,
        enrollment_id: i32,
    ) -> ResultEngine<Option<(tickets::Model, TicketType)>> {
        let found = tickets::Entity::find()
            .filter(tickets::Column::EnrollmentId.eq(enrollment_id))
            .find_also_related(ticket_types::Entity)
            .one(db)
            .await?;

        match found {
            Some((ticket, Some(ticket_type))) => Ok(Some((ticket, ticket_type.into()))),
            Some((ticket, None)) => Err(EngineError::KeyNotFound(format!(
                "ticket type of ticket {}",
                ticket.id
            ))),
            None => Ok(None),
        }
    }

    pub(super) async fn lodging_of(
        &self,
        db: &DatabaseTransaction,
        user_id: i32,
    ) -> ResultEngine<Lodging> {
        let Some(enrollment) = self.enrollment_of(db, user_id).await? else {
            return Ok(Lodging::NoEnrollment);
        };
        let Some((ticket, ticket_type)) = self.ticket_of_enrollment(db, enrollment.id).await?
        else {
            return Ok(Lodging::NoTicket);
        };
        Ok(Lodging::of(&ticket, &ticket_type))
    }

    /// Load `room_id` and make sure one more booking fits in it.
    ///
    /// Must run in the same transaction as the write that takes the spot.
    pub(super) async fn require_room_with_vacancy(
        &self,
        db: &DatabaseTransaction,
        room_id: i32,
    ) -> ResultEngine<Room> {
        let room: Room = rooms::Entity::find_by_id(room_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("room".to_string()))?
            .into();

        let booked = bookings::Entity::find()
            .filter(bookings::Column::RoomId.eq(room_id))
            .count(db)
            .await?;
        if !room.has_vacancy(booked) {
            return Err(EngineError::CannotBook("room is full".to_string()));
        }
        Ok(room)
    }
}

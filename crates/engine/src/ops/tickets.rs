use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, Ticket, TicketStatus, TicketType, ticket_types, tickets,
    validation,
};

use super::{Engine, with_tx};

/// Input accepted by [`Engine::create_ticket_type`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTicketType {
    pub name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl Engine {
    /// Return every ticket type on sale.
    pub async fn ticket_types(&self) -> ResultEngine<Vec<TicketType>> {
        with_tx!(self, |db_tx| {
            let models = ticket_types::Entity::find()
                .order_by_asc(ticket_types::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(models.into_iter().map(TicketType::from).collect())
        })
    }

    /// Return the ticket of `user_id` joined with its type.
    pub async fn ticket_for_user(&self, user_id: i32) -> ResultEngine<Ticket> {
        with_tx!(self, |db_tx| {
            let enrollment = self.require_enrollment(&db_tx, user_id).await?;
            let (ticket, ticket_type) = self
                .ticket_of_enrollment(&db_tx, enrollment.id)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("ticket".to_string()))?;
            Ok(Ticket::from((ticket, ticket_type)))
        })
    }

    /// Reserve a ticket of `ticket_type_id` for the enrollment of `user_id`.
    ///
    /// An enrollment holds at most one ticket.
    pub async fn create_ticket(&self, user_id: i32, ticket_type_id: i32) -> ResultEngine<Ticket> {
        with_tx!(self, |db_tx| {
            let enrollment = self.require_enrollment(&db_tx, user_id).await?;
            let ticket_type: TicketType = ticket_types::Entity::find_by_id(ticket_type_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("ticket type".to_string()))?
                .into();

            if self
                .ticket_of_enrollment(&db_tx, enrollment.id)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey("ticket".to_string()));
            }

            let now = Utc::now();
            let model = tickets::ActiveModel {
                id: ActiveValue::NotSet,
                ticket_type_id: ActiveValue::Set(ticket_type.id),
                enrollment_id: ActiveValue::Set(enrollment.id),
                status: ActiveValue::Set(TicketStatus::Reserved),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id, ticket_id = model.id, "ticket reserved");
            Ok(Ticket::from((model, ticket_type)))
        })
    }

    pub async fn create_ticket_type(&self, input: NewTicketType) -> ResultEngine<TicketType> {
        let name = validation::required_text(&input.name, "name")?;
        if input.price <= 0 {
            return Err(EngineError::InvalidInput(
                "price must be positive".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let now = Utc::now();
            let model = ticket_types::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                price: ActiveValue::Set(input.price),
                is_remote: ActiveValue::Set(input.is_remote),
                includes_hotel: ActiveValue::Set(input.includes_hotel),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(ticket_type_id = model.id, "ticket type created");
            Ok(model.into())
        })
    }
}

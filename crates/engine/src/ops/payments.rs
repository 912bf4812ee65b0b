use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    CardData, EngineError, Payment, ResultEngine, TicketStatus, TicketType, enrollments,
    payments, ticket_types, tickets, validation,
};

use super::{Engine, with_tx};

fn check_card(card: &CardData) -> ResultEngine<String> {
    validation::required_text(&card.issuer, "issuer")?;
    validation::required_text(&card.name, "card name")?;
    validation::required_text(&card.expiration_date, "expiration date")?;
    validation::required_text(&card.cvv, "cvv")?;
    let number = validation::card_number(&card.number)?;
    Ok(number[number.len() - 4..].to_string())
}

impl Engine {
    /// Return the payment of `ticket_id`, which must belong to `user_id`.
    pub async fn payment_for_ticket(&self, user_id: i32, ticket_id: i32) -> ResultEngine<Payment> {
        validation::positive_id(ticket_id, "ticketId")?;

        with_tx!(self, |db_tx| {
            self.owned_ticket(&db_tx, user_id, ticket_id).await?;
            payments::Entity::find()
                .filter(payments::Column::TicketId.eq(ticket_id))
                .order_by_desc(payments::Column::Id)
                .one(&db_tx)
                .await?
                .map(Payment::from)
                .ok_or_else(|| EngineError::KeyNotFound("payment".to_string()))
        })
    }

    /// Pay for `ticket_id` with `card`.
    ///
    /// No payment network is involved: the payment is recorded with the
    /// ticket type price and the ticket becomes paid.
    pub async fn process_payment(
        &self,
        user_id: i32,
        ticket_id: i32,
        card: CardData,
    ) -> ResultEngine<Payment> {
        validation::positive_id(ticket_id, "ticketId")?;

        with_tx!(self, |db_tx| {
            let (ticket, ticket_type) = self.owned_ticket(&db_tx, user_id, ticket_id).await?;
            if ticket.status == TicketStatus::Paid {
                return Err(EngineError::ExistingKey("payment".to_string()));
            }
            let last_digits = check_card(&card)?;

            let now = Utc::now();
            let payment = payments::ActiveModel {
                id: ActiveValue::NotSet,
                ticket_id: ActiveValue::Set(ticket.id),
                value: ActiveValue::Set(ticket_type.price),
                card_issuer: ActiveValue::Set(card.issuer.trim().to_string()),
                card_last_digits: ActiveValue::Set(last_digits),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            let mut ticket: tickets::ActiveModel = ticket.into();
            ticket.status = ActiveValue::Set(TicketStatus::Paid);
            ticket.updated_at = ActiveValue::Set(now);
            ticket.update(&db_tx).await?;

            tracing::info!(user_id, ticket_id, value = payment.value, "payment processed");
            Ok(payment.into())
        })
    }

    /// Load a ticket and check it belongs to an enrollment of `user_id`.
    async fn owned_ticket(
        &self,
        db: &DatabaseTransaction,
        user_id: i32,
        ticket_id: i32,
    ) -> ResultEngine<(tickets::Model, TicketType)> {
        let (ticket, ticket_type) = tickets::Entity::find_by_id(ticket_id)
            .find_also_related(ticket_types::Entity)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("ticket".to_string()))?;
        let ticket_type = ticket_type
            .ok_or_else(|| EngineError::KeyNotFound("ticket type".to_string()))?;

        let owner = enrollments::Entity::find_by_id(ticket.enrollment_id)
            .one(db)
            .await?
            .map(|enrollment| enrollment.user_id);
        if owner != Some(user_id) {
            return Err(EngineError::Unauthorized(
                "ticket belongs to another user".to_string(),
            ));
        }

        Ok((ticket, ticket_type.into()))
    }
}

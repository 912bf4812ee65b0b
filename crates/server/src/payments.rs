//! Payment API endpoints

use api_types::payment::{Payment, PaymentProcess, PaymentQuery};
use axum::{Extension, Json, extract::State};

use crate::{
    ServerError,
    extract::{Payload, QueryParams},
    server::{AuthUser, ServerState},
};

fn payment_view(payment: engine::Payment) -> Payment {
    Payment {
        id: payment.id,
        ticket_id: payment.ticket_id,
        value: payment.value,
        card_issuer: payment.card_issuer,
        card_last_digits: payment.card_last_digits,
        created_at: payment.created_at,
        updated_at: payment.updated_at,
    }
}

pub async fn get(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    QueryParams(query): QueryParams<PaymentQuery>,
) -> Result<Json<Payment>, ServerError> {
    let payment = state
        .engine
        .payment_for_ticket(user_id, query.ticket_id)
        .await?;
    Ok(Json(payment_view(payment)))
}

/// Pay for a ticket. No payment network is contacted.
pub async fn process(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Payload(payload): Payload<PaymentProcess>,
) -> Result<Json<Payment>, ServerError> {
    let card = payload.card_data;
    let payment = state
        .engine
        .process_payment(
            user_id,
            payload.ticket_id,
            engine::CardData {
                issuer: card.issuer,
                number: card.number,
                name: card.name,
                expiration_date: card.expiration_date,
                cvv: card.cvv,
            },
        )
        .await?;
    Ok(Json(payment_view(payment)))
}

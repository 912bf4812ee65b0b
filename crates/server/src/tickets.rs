//! Ticket API endpoints

use api_types::ticket::{Ticket, TicketNew, TicketStatus, TicketType};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    extract::Payload,
    server::{AuthUser, ServerState},
};

fn ticket_type_view(ticket_type: engine::TicketType) -> TicketType {
    TicketType {
        id: ticket_type.id,
        name: ticket_type.name,
        price: ticket_type.price,
        is_remote: ticket_type.is_remote,
        includes_hotel: ticket_type.includes_hotel,
        created_at: ticket_type.created_at,
        updated_at: ticket_type.updated_at,
    }
}

fn ticket_view(ticket: engine::Ticket) -> Ticket {
    Ticket {
        id: ticket.id,
        status: match ticket.status {
            engine::TicketStatus::Reserved => TicketStatus::Reserved,
            engine::TicketStatus::Paid => TicketStatus::Paid,
        },
        ticket_type_id: ticket.ticket_type.id,
        enrollment_id: ticket.enrollment_id,
        ticket_type: ticket_type_view(ticket.ticket_type),
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    }
}

pub async fn types(State(state): State<ServerState>) -> Result<Json<Vec<TicketType>>, ServerError> {
    let types = state
        .engine
        .ticket_types()
        .await?
        .into_iter()
        .map(ticket_type_view)
        .collect();
    Ok(Json(types))
}

/// Return the caller's ticket
pub async fn get(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Ticket>, ServerError> {
    let ticket = state.engine.ticket_for_user(user_id).await?;
    Ok(Json(ticket_view(ticket)))
}

/// Reserve a ticket for the caller
pub async fn create(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Payload(payload): Payload<TicketNew>,
) -> Result<(StatusCode, Json<Ticket>), ServerError> {
    let ticket = state
        .engine
        .create_ticket(user_id, payload.ticket_type_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ticket_view(ticket))))
}

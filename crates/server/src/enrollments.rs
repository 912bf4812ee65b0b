//! Enrollment API endpoints

use api_types::enrollment::{
    Address, AddressLookup, CepQuery, Enrollment, EnrollmentNew,
};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    ServerError,
    extract::{Payload, QueryParams},
    server::{AuthUser, ServerState},
};

fn enrollment_view(enrollment: engine::Enrollment) -> Enrollment {
    let address = enrollment.address;
    Enrollment {
        id: enrollment.id,
        name: enrollment.name,
        cpf: enrollment.cpf,
        birthday: enrollment.birthday,
        phone: enrollment.phone,
        address: Address {
            id: address.id,
            cep: address.cep,
            street: address.street,
            city: address.city,
            state: address.state,
            number: address.number,
            neighborhood: address.neighborhood,
            address_detail: address.address_detail,
        },
    }
}

/// Return the caller's enrollment, or `204` when there is none.
pub async fn get(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Response, ServerError> {
    match state.engine.enrollment_for_user(user_id).await? {
        Some(enrollment) => Ok(Json(enrollment_view(enrollment)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Resolve a postal code, or `204` when it is unknown.
pub async fn address_by_cep(
    State(state): State<ServerState>,
    QueryParams(query): QueryParams<CepQuery>,
) -> Result<Response, ServerError> {
    match state.engine.lookup_address(&query.cep).await? {
        Some(found) => Ok(Json(AddressLookup {
            logradouro: found.logradouro,
            complemento: found.complemento,
            bairro: found.bairro,
            cidade: found.cidade,
            uf: found.uf,
        })
        .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Create or update the caller's enrollment.
pub async fn upsert(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Payload(payload): Payload<EnrollmentNew>,
) -> Result<Json<Enrollment>, ServerError> {
    let address = payload.address;
    let input = engine::NewEnrollment {
        name: payload.name,
        cpf: payload.cpf,
        birthday: payload.birthday,
        phone: payload.phone,
        address: engine::NewAddress {
            cep: address.cep,
            street: address.street,
            city: address.city,
            number: address.number,
            state: address.state,
            neighborhood: address.neighborhood,
            address_detail: address.address_detail,
        },
    };

    let enrollment = state.engine.upsert_enrollment(user_id, input).await?;
    Ok(Json(enrollment_view(enrollment)))
}

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use std::sync::Arc;

use crate::{auth, booking, enrollments, events, health, hotels, payments, tickets, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Id of the user owning the bearer token, set by the auth middleware.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub i32);

async fn require_session(
    State(state): State<ServerState>,
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Ok(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user_id = state
        .engine
        .authenticate(bearer.token())
        .await
        .map_err(|err| match err {
            engine::EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            other => {
                tracing::error!("authentication failed: {other}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

/// Build the application router.
pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route(
            "/enrollments",
            get(enrollments::get).post(enrollments::upsert),
        )
        .route("/tickets/types", get(tickets::types))
        .route("/tickets", get(tickets::get).post(tickets::create))
        .route("/payments", get(payments::get))
        .route("/payments/process", post(payments::process))
        .route("/hotels", get(hotels::list))
        .route("/hotels/{hotel_id}", get(hotels::get))
        .route("/booking", get(booking::get).post(booking::create))
        .route(
            "/booking/{booking_id}",
            put(booking::change).delete(booking::cancel),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/health", get(health::get))
        .route("/event", get(events::get))
        .route("/users", post(users::create))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/enrollments/cep", get(enrollments::address_by_cep))
        .merge(protected)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

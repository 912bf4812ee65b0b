#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use engine::{
    Engine, NewAddress, NewEnrollment, NewEvent, NewTicketType, Ticket, TicketType, User,
};
use migration::MigratorTrait;

pub const SECRET: &str = "test-secret";
pub const KNOWN_CEP: &str = "04538-132";

/// Postal code service answering `KNOWN_CEP` and `{"erro": true}` for
/// anything else.
pub async fn postal_code_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/04538132/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "04538-132",
            "logradouro": "Avenida Brigadeiro Faria Lima",
            "complemento": "de 3252 ao fim - lado par",
            "bairro": "Itaim Bibi",
            "localidade": "São Paulo",
            "uf": "SP",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": true })))
        .with_priority(10)
        .mount(&server)
        .await;
    server
}

pub async fn engine_with_db(postal: &MockServer) -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .token_secret(SECRET)
        .postal_code_url(&postal.uri())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn started_event(engine: &Engine) -> i32 {
    let starts_at = Utc::now() - Duration::days(1);
    engine
        .create_event(NewEvent {
            title: "Driven.t".to_string(),
            background_image_url: "linear-gradient(to right, #FA4098, #FFD77F)".to_string(),
            logo_image_url: "https://example.com/logo.png".to_string(),
            starts_at,
            ends_at: starts_at + Duration::days(5),
        })
        .await
        .unwrap()
        .id
}

pub async fn user(engine: &Engine, email: &str) -> User {
    engine.create_account(email, "s3cr3t!").await.unwrap()
}

pub fn enrollment_input(cpf: &str) -> NewEnrollment {
    NewEnrollment {
        name: "Ana Souza".to_string(),
        cpf: cpf.to_string(),
        birthday: Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap(),
        phone: "(21) 98999-9999".to_string(),
        address: NewAddress {
            cep: KNOWN_CEP.to_string(),
            street: "Avenida Brigadeiro Faria Lima".to_string(),
            city: "São Paulo".to_string(),
            number: "3500".to_string(),
            state: "SP".to_string(),
            neighborhood: "Itaim Bibi".to_string(),
            address_detail: None,
        },
    }
}

pub async fn enrolled_user(engine: &Engine, email: &str, cpf: &str) -> User {
    let user = user(engine, email).await;
    engine
        .upsert_enrollment(user.id, enrollment_input(cpf))
        .await
        .unwrap();
    user
}

pub async fn ticket_type(engine: &Engine, is_remote: bool, includes_hotel: bool) -> TicketType {
    engine
        .create_ticket_type(NewTicketType {
            name: "Presencial".to_string(),
            price: 600,
            is_remote,
            includes_hotel,
        })
        .await
        .unwrap()
}

pub fn card() -> engine::CardData {
    engine::CardData {
        issuer: "VISA".to_string(),
        number: "4111111111111234".to_string(),
        name: "Ana Souza".to_string(),
        expiration_date: "12/30".to_string(),
        cvv: "123".to_string(),
    }
}

/// Enrolled user holding a ticket, paid when `paid`.
pub async fn ticket_holder(
    engine: &Engine,
    email: &str,
    cpf: &str,
    ticket_type: &TicketType,
    paid: bool,
) -> (User, Ticket) {
    let user = enrolled_user(engine, email, cpf).await;
    let ticket = engine.create_ticket(user.id, ticket_type.id).await.unwrap();
    if paid {
        engine
            .process_payment(user.id, ticket.id, card())
            .await
            .unwrap();
    }
    (user, ticket)
}

/// Valid CPFs for fixtures.
pub const CPFS: [&str; 4] = ["52998224725", "11144477735", "39053344705", "86288366757"];

mod common;

use common::{
    CPFS, card, enrolled_user, engine_with_db, postal_code_server, ticket_holder, ticket_type,
    user,
};
use engine::{EngineError, NewTicketType, TicketStatus};

#[tokio::test]
async fn ticket_types_listed_in_creation_order() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    assert!(engine.ticket_types().await.unwrap().is_empty());

    let remote = ticket_type(&engine, true, false).await;
    let with_hotel = ticket_type(&engine, false, true).await;

    let types = engine.ticket_types().await.unwrap();
    assert_eq!(types, vec![remote, with_hotel]);
}

#[tokio::test]
async fn ticket_type_price_must_be_positive() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    assert!(matches!(
        engine
            .create_ticket_type(NewTicketType {
                name: "Free".to_string(),
                price: 0,
                is_remote: true,
                includes_hotel: false,
            })
            .await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn create_ticket_reserves_and_is_returned() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let user = enrolled_user(&engine, "ana@example.com", CPFS[0]).await;

    let created = engine.create_ticket(user.id, kind.id).await.unwrap();
    assert_eq!(created.status, TicketStatus::Reserved);
    assert_eq!(created.ticket_type, kind);

    assert_eq!(engine.ticket_for_user(user.id).await.unwrap(), created);
}

#[tokio::test]
async fn ticket_requires_enrollment_and_known_type() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, true, false).await;
    let bare = user(&engine, "bare@example.com").await;
    let enrolled = enrolled_user(&engine, "ana@example.com", CPFS[0]).await;

    assert_eq!(
        engine.create_ticket(bare.id, kind.id).await,
        Err(EngineError::KeyNotFound("enrollment".to_string()))
    );
    assert_eq!(
        engine.create_ticket(enrolled.id, kind.id + 100).await,
        Err(EngineError::KeyNotFound("ticket type".to_string()))
    );
    assert_eq!(
        engine.ticket_for_user(bare.id).await,
        Err(EngineError::KeyNotFound("enrollment".to_string()))
    );
    assert_eq!(
        engine.ticket_for_user(enrolled.id).await,
        Err(EngineError::KeyNotFound("ticket".to_string()))
    );
}

#[tokio::test]
async fn second_ticket_conflicts() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, true, false).await;
    let user = enrolled_user(&engine, "ana@example.com", CPFS[0]).await;

    engine.create_ticket(user.id, kind.id).await.unwrap();
    assert!(matches!(
        engine.create_ticket(user.id, kind.id).await,
        Err(EngineError::ExistingKey(_))
    ));
}

#[tokio::test]
async fn payment_marks_ticket_paid() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, ticket) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, false).await;

    let payment = engine
        .process_payment(user.id, ticket.id, card())
        .await
        .unwrap();
    assert_eq!(payment.ticket_id, ticket.id);
    assert_eq!(payment.value, kind.price);
    assert_eq!(payment.card_issuer, "VISA");
    assert_eq!(payment.card_last_digits, "1234");

    assert!(engine.ticket_for_user(user.id).await.unwrap().is_paid());
    assert_eq!(
        engine.payment_for_ticket(user.id, ticket.id).await.unwrap(),
        payment
    );
}

#[tokio::test]
async fn paying_twice_conflicts() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, ticket) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;

    assert!(matches!(
        engine.process_payment(user.id, ticket.id, card()).await,
        Err(EngineError::ExistingKey(_))
    ));
}

#[tokio::test]
async fn payment_checks_ticket_and_owner() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (owner, ticket) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, false).await;
    let intruder = enrolled_user(&engine, "bia@example.com", CPFS[1]).await;

    assert_eq!(
        engine.payment_for_ticket(owner.id, ticket.id + 100).await,
        Err(EngineError::KeyNotFound("ticket".to_string()))
    );
    assert!(matches!(
        engine.payment_for_ticket(intruder.id, ticket.id).await,
        Err(EngineError::Unauthorized(_))
    ));
    assert!(matches!(
        engine
            .process_payment(intruder.id, ticket.id, card())
            .await,
        Err(EngineError::Unauthorized(_))
    ));
    assert_eq!(
        engine.payment_for_ticket(owner.id, ticket.id).await,
        Err(EngineError::KeyNotFound("payment".to_string()))
    );
}

#[tokio::test]
async fn invalid_card_leaves_ticket_reserved() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, ticket) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, false).await;

    let mut bad = card();
    bad.number = "1234".to_string();
    assert!(matches!(
        engine.process_payment(user.id, ticket.id, bad).await,
        Err(EngineError::InvalidInput(_))
    ));
    assert!(!engine.ticket_for_user(user.id).await.unwrap().is_paid());
}

#[tokio::test]
async fn ticket_checks_come_before_card_checks() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (owner, ticket) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;
    let intruder = enrolled_user(&engine, "bia@example.com", CPFS[1]).await;

    let mut bad = card();
    bad.number = "12".to_string();
    assert_eq!(
        engine.process_payment(owner.id, 9999, bad.clone()).await,
        Err(EngineError::KeyNotFound("ticket".to_string()))
    );
    assert!(matches!(
        engine.process_payment(intruder.id, ticket.id, bad.clone()).await,
        Err(EngineError::Unauthorized(_))
    ));
    assert!(matches!(
        engine.process_payment(owner.id, ticket.id, bad).await,
        Err(EngineError::ExistingKey(_))
    ));
}

#[tokio::test]
async fn card_number_is_digits_only_without_upper_bound() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, ticket) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, false).await;

    let mut spaced = card();
    spaced.number = "4111 1111 1111 1111".to_string();
    assert!(matches!(
        engine.process_payment(user.id, ticket.id, spaced).await,
        Err(EngineError::InvalidInput(_))
    ));

    let mut long = card();
    long.number = "41111111111111119876".to_string();
    let payment = engine.process_payment(user.id, ticket.id, long).await.unwrap();
    assert_eq!(payment.card_last_digits, "9876");
}

#[tokio::test]
async fn payment_lookup_rejects_non_positive_ticket_id() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let user = enrolled_user(&engine, "ana@example.com", CPFS[0]).await;

    assert!(matches!(
        engine.payment_for_ticket(user.id, 0).await,
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.payment_for_ticket(user.id, -4).await,
        Err(EngineError::InvalidInput(_))
    ));
}

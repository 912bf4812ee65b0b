mod common;

use common::{CPFS, engine_with_db, enrolled_user, postal_code_server, ticket_holder, ticket_type};
use engine::{Engine, EngineError, Room};

async fn hotel_with_room(engine: &Engine, capacity: i32) -> Room {
    let hotel = engine
        .create_hotel("Driven Resort", "https://example.com/hotel.png")
        .await
        .unwrap();
    engine.create_room(hotel.id, "101", capacity).await.unwrap()
}

#[tokio::test]
async fn hotels_visible_with_paid_lodging_ticket() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, _) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;
    let room = hotel_with_room(&engine, 3).await;

    let hotels = engine.list_hotels(user.id).await.unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].id, room.hotel_id);

    let detail = engine.hotel_with_rooms(user.id, room.hotel_id).await.unwrap();
    assert_eq!(detail.hotel, hotels[0]);
    assert_eq!(detail.rooms, vec![room]);
}

#[tokio::test]
async fn hotel_access_rules() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    hotel_with_room(&engine, 3).await;
    let remote = ticket_type(&engine, true, false).await;
    let no_hotel = ticket_type(&engine, false, false).await;
    let with_hotel = ticket_type(&engine, false, true).await;

    let bare = common::user(&engine, "bare@example.com").await;
    let enrolled = enrolled_user(&engine, "enrolled@example.com", CPFS[0]).await;
    let (unpaid, _) = ticket_holder(&engine, "unpaid@example.com", CPFS[1], &with_hotel, false).await;
    let (online, _) = ticket_holder(&engine, "remote@example.com", CPFS[2], &remote, true).await;
    let (no_lodging, _) =
        ticket_holder(&engine, "nohotel@example.com", CPFS[3], &no_hotel, true).await;

    assert!(matches!(engine.list_hotels(bare.id).await, Err(EngineError::KeyNotFound(_))));
    assert!(matches!(engine.list_hotels(enrolled.id).await, Err(EngineError::KeyNotFound(_))));
    for user in [unpaid, online, no_lodging] {
        assert!(matches!(
            engine.list_hotels(user.id).await,
            Err(EngineError::PaymentRequired(_))
        ));
    }
}

#[tokio::test]
async fn empty_hotel_list_and_unknown_hotel() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, _) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;

    assert!(matches!(engine.list_hotels(user.id).await, Err(EngineError::KeyNotFound(_))));
    assert_eq!(
        engine.hotel_with_rooms(user.id, 7).await,
        Err(EngineError::KeyNotFound("hotel".to_string()))
    );
    assert!(matches!(
        engine.hotel_with_rooms(user.id, 0).await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn room_needs_existing_hotel_and_capacity() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    assert_eq!(
        engine.create_room(1, "101", 2).await,
        Err(EngineError::KeyNotFound("hotel".to_string()))
    );

    let hotel = engine.create_hotel("Inn", "https://example.com/inn.png").await.unwrap();
    assert!(matches!(
        engine.create_room(hotel.id, "101", 0).await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn book_room_and_read_it_back() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, _) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;
    let room = hotel_with_room(&engine, 2).await;

    assert!(matches!(
        engine.booking_for_user(user.id).await,
        Err(EngineError::KeyNotFound(_))
    ));

    let booking_id = engine.book_room(user.id, room.id).await.unwrap();
    let booking = engine.booking_for_user(user.id).await.unwrap();
    assert_eq!(booking.id, booking_id);
    assert_eq!(booking.room, room);
}

#[tokio::test]
async fn booking_never_exceeds_capacity() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let room = hotel_with_room(&engine, 2).await;

    let mut users = Vec::new();
    for (i, cpf) in CPFS.iter().enumerate().take(3) {
        let (user, _) =
            ticket_holder(&engine, &format!("guest{i}@example.com"), cpf, &kind, true).await;
        users.push(user);
    }

    engine.book_room(users[0].id, room.id).await.unwrap();
    engine.book_room(users[1].id, room.id).await.unwrap();
    assert_eq!(
        engine.book_room(users[2].id, room.id).await,
        Err(EngineError::CannotBook("room is full".to_string()))
    );
}

#[tokio::test]
async fn booking_rules() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let with_hotel = ticket_type(&engine, false, true).await;
    let remote = ticket_type(&engine, true, false).await;
    let room = hotel_with_room(&engine, 3).await;

    let (paid, _) = ticket_holder(&engine, "ana@example.com", CPFS[0], &with_hotel, true).await;
    let (unpaid, _) = ticket_holder(&engine, "bia@example.com", CPFS[1], &with_hotel, false).await;
    let (online, _) = ticket_holder(&engine, "caio@example.com", CPFS[2], &remote, true).await;
    let bare = common::user(&engine, "dani@example.com").await;

    assert!(matches!(
        engine.book_room(paid.id, 0).await,
        Err(EngineError::InvalidInput(_))
    ));
    assert_eq!(
        engine.book_room(paid.id, room.id + 100).await,
        Err(EngineError::KeyNotFound("room".to_string()))
    );
    for user in [unpaid, online, bare] {
        assert!(matches!(
            engine.book_room(user.id, room.id).await,
            Err(EngineError::CannotBook(_))
        ));
    }

    engine.book_room(paid.id, room.id).await.unwrap();
    assert!(matches!(
        engine.book_room(paid.id, room.id).await,
        Err(EngineError::CannotBook(_))
    ));
}

#[tokio::test]
async fn change_booking_moves_to_another_room() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (user, _) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;
    let first = hotel_with_room(&engine, 1).await;
    let second = engine.create_room(first.hotel_id, "102", 1).await.unwrap();

    let booking_id = engine.book_room(user.id, first.id).await.unwrap();
    assert_eq!(
        engine.change_booking(user.id, booking_id, first.id).await,
        Ok(booking_id)
    );
    assert_eq!(
        engine.change_booking(user.id, booking_id, second.id).await,
        Ok(booking_id)
    );
    assert_eq!(engine.booking_for_user(user.id).await.unwrap().room, second);
}

#[tokio::test]
async fn change_booking_rules() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (ana, _) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;
    let (bia, _) = ticket_holder(&engine, "bia@example.com", CPFS[1], &kind, true).await;
    let full = hotel_with_room(&engine, 1).await;
    let free = engine.create_room(full.hotel_id, "102", 2).await.unwrap();

    let ana_booking = engine.book_room(ana.id, full.id).await.unwrap();

    assert!(matches!(
        engine.change_booking(bia.id, 0, free.id).await,
        Err(EngineError::InvalidInput(_))
    ));
    assert_eq!(
        engine.change_booking(bia.id, ana_booking, free.id + 100).await,
        Err(EngineError::KeyNotFound("room".to_string()))
    );
    assert_eq!(
        engine.change_booking(bia.id, ana_booking, full.id).await,
        Err(EngineError::CannotBook("room is full".to_string()))
    );
    assert!(matches!(
        engine.change_booking(bia.id, ana_booking, free.id).await,
        Err(EngineError::CannotBook(_))
    ));
}

#[tokio::test]
async fn cancel_booking_rules() {
    let postal = postal_code_server().await;
    let (engine, _db) = engine_with_db(&postal).await;
    let kind = ticket_type(&engine, false, true).await;
    let (ana, _) = ticket_holder(&engine, "ana@example.com", CPFS[0], &kind, true).await;
    let (bia, _) = ticket_holder(&engine, "bia@example.com", CPFS[1], &kind, true).await;
    let room = hotel_with_room(&engine, 1).await;

    let booking_id = engine.book_room(ana.id, room.id).await.unwrap();

    assert!(matches!(
        engine.cancel_booking(ana.id, -1).await,
        Err(EngineError::InvalidInput(_))
    ));
    assert_eq!(
        engine.cancel_booking(ana.id, booking_id + 100).await,
        Err(EngineError::KeyNotFound("booking".to_string()))
    );
    assert!(matches!(
        engine.cancel_booking(bia.id, booking_id).await,
        Err(EngineError::CannotBook(_))
    ));

    assert_eq!(engine.cancel_booking(ana.id, booking_id).await, Ok(booking_id));
    // The spot is free again.
    engine.book_room(bia.id, room.id).await.unwrap();
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod event {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Event {
        pub id: i32,
        pub title: String,
        pub background_image_url: String,
        pub logo_image_url: String,
        pub starts_at: DateTime<Utc>,
        pub ends_at: DateTime<Utc>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub email: String,
        pub password: String,
    }

    /// Query string of `POST /users`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserNewQuery {
        pub event_id: Option<i32>,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: i32,
        pub email: String,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignIn {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Session {
        pub user: crate::user::User,
        pub token: String,
    }
}

pub mod enrollment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CepQuery {
        pub cep: String,
    }

    /// Address resolved from a postal code. Field names follow the postal
    /// code service.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AddressLookup {
        pub logradouro: String,
        pub complemento: String,
        pub bairro: String,
        pub cidade: String,
        pub uf: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AddressNew {
        pub cep: String,
        pub street: String,
        pub city: String,
        pub number: String,
        pub state: String,
        pub neighborhood: String,
        /// Absent, `null` and `""` all mean "no detail".
        #[serde(default)]
        pub address_detail: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EnrollmentNew {
        pub name: String,
        pub cpf: String,
        pub birthday: DateTime<Utc>,
        pub phone: String,
        pub address: AddressNew,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Address {
        pub id: i32,
        pub cep: String,
        pub street: String,
        pub city: String,
        pub state: String,
        pub number: String,
        pub neighborhood: String,
        pub address_detail: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Enrollment {
        pub id: i32,
        pub name: String,
        pub cpf: String,
        pub birthday: DateTime<Utc>,
        pub phone: String,
        pub address: Address,
    }
}

pub mod ticket {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TicketStatus {
        Reserved,
        Paid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TicketType {
        pub id: i32,
        pub name: String,
        pub price: i32,
        pub is_remote: bool,
        pub includes_hotel: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TicketNew {
        pub ticket_type_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Ticket {
        pub id: i32,
        pub status: TicketStatus,
        pub ticket_type_id: i32,
        pub enrollment_id: i32,
        #[serde(rename = "TicketType")]
        pub ticket_type: TicketType,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod payment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentQuery {
        pub ticket_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CardData {
        pub issuer: String,
        pub number: String,
        pub name: String,
        pub expiration_date: String,
        pub cvv: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentProcess {
        pub ticket_id: i32,
        pub card_data: CardData,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payment {
        pub id: i32,
        pub ticket_id: i32,
        pub value: i32,
        pub card_issuer: String,
        pub card_last_digits: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod hotel {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Hotel {
        pub id: i32,
        pub name: String,
        pub image: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Room {
        pub id: i32,
        pub name: String,
        pub capacity: i32,
        pub hotel_id: i32,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HotelWithRooms {
        pub id: i32,
        pub name: String,
        pub image: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
        #[serde(rename = "Rooms")]
        pub rooms: Vec<Room>,
    }
}

pub mod booking {
    use super::*;

    /// Body of `POST /booking` and `PUT /booking/{bookingId}`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingRoom {
        pub room_id: i32,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingId {
        pub booking_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Booking {
        pub id: i32,
        #[serde(rename = "Room")]
        pub room: crate::hotel::Room,
    }
}

pub use addresses::{Address, AddressLookup};
pub use bookings::Booking;
pub use enrollments::{Enrollment, NewAddress, NewEnrollment};
pub use error::EngineError;
pub use events::Event;
pub use hotels::Hotel;
pub use ops::{Engine, EngineBuilder, HotelWithRooms, NewEvent, NewTicketType, SignIn};
pub use payments::{CardData, Payment};
pub use rooms::Room;
pub use ticket_types::TicketType;
pub use tickets::{Ticket, TicketStatus};
pub use users::User;

mod addresses;
mod auth;
mod bookings;
mod enrollments;
mod error;
mod events;
mod hotels;
mod ops;
mod payments;
pub mod postal_code;
mod rooms;
mod sessions;
mod ticket_types;
mod tickets;
mod users;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;

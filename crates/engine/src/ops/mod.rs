use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine, postal_code::PostalCodeClient};

mod access;
mod bookings;
mod enrollments;
mod events;
mod hotels;
mod payments;
mod tickets;
mod users;

pub use events::NewEvent;
pub use hotels::HotelWithRooms;
pub use tickets::NewTicketType;
pub use users::SignIn;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    token_secret: String,
    postal_code: PostalCodeClient,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    token_secret: String,
    postal_code_url: Option<String>,
    postal_code_timeout: Option<Duration>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Secret used to sign session tokens. Required.
    pub fn token_secret(mut self, secret: &str) -> EngineBuilder {
        self.token_secret = secret.to_string();
        self
    }

    /// Base URL of the postal code service, defaults to ViaCEP.
    pub fn postal_code_url(mut self, url: &str) -> EngineBuilder {
        self.postal_code_url = Some(url.to_string());
        self
    }

    pub fn postal_code_timeout(mut self, timeout: Duration) -> EngineBuilder {
        self.postal_code_timeout = Some(timeout);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        if self.token_secret.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "token secret must not be empty".to_string(),
            ));
        }

        let postal_code = PostalCodeClient::new(
            self.postal_code_url
                .as_deref()
                .unwrap_or(crate::postal_code::DEFAULT_BASE_URL),
            self.postal_code_timeout
                .unwrap_or(crate::postal_code::DEFAULT_TIMEOUT),
        )?;

        Ok(Engine {
            database: self.database,
            token_secret: self.token_secret,
            postal_code,
        })
    }
}

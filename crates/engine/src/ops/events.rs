use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseTransaction, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Event, ResultEngine, events, validation};

use super::{Engine, with_tx};

/// Input accepted by [`Engine::create_event`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub background_image_url: String,
    pub logo_image_url: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Engine {
    /// Return the event attendees register for: the first one created.
    pub async fn first_event(&self) -> ResultEngine<Event> {
        with_tx!(self, |db_tx| self.first_event_in(&db_tx).await)
    }

    pub(super) async fn first_event_in(&self, db: &DatabaseTransaction) -> ResultEngine<Event> {
        events::Entity::find()
            .order_by_asc(events::Column::CreatedAt)
            .order_by_asc(events::Column::Id)
            .one(db)
            .await?
            .map(Event::from)
            .ok_or_else(|| EngineError::KeyNotFound("event".to_string()))
    }

    pub async fn create_event(&self, input: NewEvent) -> ResultEngine<Event> {
        let title = validation::required_text(&input.title, "title")?;
        let background = validation::required_text(&input.background_image_url, "background")?;
        let logo = validation::required_text(&input.logo_image_url, "logo")?;
        if input.ends_at < input.starts_at {
            return Err(EngineError::InvalidInput(
                "event cannot end before it starts".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let now = Utc::now();
            let model = events::ActiveModel {
                id: ActiveValue::NotSet,
                title: ActiveValue::Set(title),
                background_image_url: ActiveValue::Set(background),
                logo_image_url: ActiveValue::Set(logo),
                starts_at: ActiveValue::Set(input.starts_at),
                ends_at: ActiveValue::Set(input.ends_at),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(event_id = model.id, "event created");
            Ok(model.into())
        })
    }
}

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, Event, ResultEngine, User, auth, events, sessions, users, validation,
};

use super::{Engine, with_tx};

/// A successful sign-in: the user and the bearer token of the new session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignIn {
    pub user: User,
    pub token: String,
}

impl Engine {
    /// Register a new user for an event.
    ///
    /// `event_id` selects the event; without it the first event is used.
    /// Registration only opens once the event has started.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        event_id: Option<i32>,
    ) -> ResultEngine<User> {
        let email = validation::email(email)?;
        validation::password(password)?;

        with_tx!(self, |db_tx| {
            let event: Event = match event_id {
                Some(id) => events::Entity::find_by_id(id)
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("event".to_string()))?
                    .into(),
                None => self.first_event_in(&db_tx).await?,
            };
            if !event.has_started(Utc::now()) {
                return Err(EngineError::EventNotStarted);
            }

            let user = self.insert_user(&db_tx, &email, password).await?;
            tracing::info!(user_id = user.id, event_id = event.id, "user registered");
            Ok(user)
        })
    }

    /// Create an account without any event check. Used for seeding.
    pub async fn create_account(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = validation::email(email)?;
        validation::password(password)?;

        with_tx!(self, |db_tx| {
            let user = self.insert_user(&db_tx, &email, password).await?;
            tracing::info!(user_id = user.id, "account created");
            Ok(user)
        })
    }

    /// Check credentials and open a new session.
    ///
    /// Unknown email and wrong password fail the same way.
    pub async fn sign_in(&self, email: &str, password: &str) -> ResultEngine<SignIn> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Email.eq(email.trim()))
                .one(&db_tx)
                .await?
                .ok_or(EngineError::InvalidCredentials)?;
            auth::verify_password(password, &model.password)?;

            let token = auth::issue_token(model.id, &self.token_secret)?;
            let now = Utc::now();
            sessions::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(model.id),
                token: ActiveValue::Set(token.clone()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id = model.id, "session opened");
            Ok(SignIn {
                user: model.into(),
                token,
            })
        })
    }

    /// Resolve a bearer token to the id of the user it was issued to.
    pub async fn authenticate(&self, token: &str) -> ResultEngine<i32> {
        let user_id = auth::decode_token(token, &self.token_secret)?;

        with_tx!(self, |db_tx| {
            let session = sessions::Entity::find()
                .filter(sessions::Column::Token.eq(token))
                .filter(sessions::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;
            match session {
                Some(_) => Ok(user_id),
                None => Err(EngineError::Unauthorized("session not found".to_string())),
            }
        })
    }

    async fn insert_user(
        &self,
        db: &DatabaseTransaction,
        email: &str,
        password: &str,
    ) -> ResultEngine<User> {
        let exists = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?
            .is_some();
        if exists {
            return Err(EngineError::ExistingKey(email.to_string()));
        }

        let now = Utc::now();
        let model = users::ActiveModel {
            id: ActiveValue::NotSet,
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(auth::hash_password(password)?),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(db)
        .await?;

        Ok(model.into())
    }
}

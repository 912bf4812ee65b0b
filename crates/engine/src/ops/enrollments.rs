use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    Address, AddressLookup, EngineError, Enrollment, NewAddress, NewEnrollment, ResultEngine,
    addresses, enrollments, validation,
};

use super::{Engine, with_tx};

/// Enrollment input after validation.
struct CheckedEnrollment {
    name: String,
    cpf: String,
    phone: String,
    address: CheckedAddress,
}

struct CheckedAddress {
    cep: String,
    street: String,
    city: String,
    number: String,
    state: String,
    neighborhood: String,
    address_detail: Option<String>,
}

fn check_address(input: &NewAddress) -> ResultEngine<CheckedAddress> {
    Ok(CheckedAddress {
        cep: validation::masked_cep(&input.cep)?,
        street: validation::required_text(&input.street, "street")?,
        city: validation::required_text(&input.city, "city")?,
        number: validation::required_text(&input.number, "number")?,
        state: validation::state(&input.state)?,
        neighborhood: validation::required_text(&input.neighborhood, "neighborhood")?,
        address_detail: validation::optional_text(input.address_detail.as_deref()),
    })
}

fn check_enrollment(input: &NewEnrollment) -> ResultEngine<CheckedEnrollment> {
    Ok(CheckedEnrollment {
        name: validation::person_name(&input.name)?,
        cpf: validation::cpf(&input.cpf)?,
        phone: validation::mobile_phone(&input.phone)?,
        address: check_address(&input.address)?,
    })
}

impl Engine {
    /// Return the enrollment of `user_id` with its address, if any.
    pub async fn enrollment_for_user(&self, user_id: i32) -> ResultEngine<Option<Enrollment>> {
        with_tx!(self, |db_tx| {
            let Some(enrollment) = self.enrollment_of(&db_tx, user_id).await? else {
                return Ok(None);
            };
            let address = self.address_of(&db_tx, enrollment.id).await?;
            Ok(Some(Enrollment::from((enrollment, address))))
        })
    }

    /// Resolve a postal code through the postal code service.
    pub async fn lookup_address(&self, cep: &str) -> ResultEngine<Option<AddressLookup>> {
        self.postal_code.lookup(cep).await
    }

    /// Create or update the enrollment of `user_id` and its address.
    ///
    /// The postal code is checked against the postal code service before
    /// anything is written.
    pub async fn upsert_enrollment(
        &self,
        user_id: i32,
        input: NewEnrollment,
    ) -> ResultEngine<Enrollment> {
        let checked = check_enrollment(&input)?;
        if self.postal_code.lookup(&checked.address.cep).await?.is_none() {
            return Err(EngineError::InvalidInput(format!(
                "unknown cep {}",
                checked.address.cep
            )));
        }

        with_tx!(self, |db_tx| {
            let taken = enrollments::Entity::find()
                .filter(enrollments::Column::Cpf.eq(checked.cpf.as_str()))
                .filter(enrollments::Column::UserId.ne(user_id))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey("cpf".to_string()));
            }

            let now = Utc::now();
            let enrollment = match self.enrollment_of(&db_tx, user_id).await? {
                Some(existing) => {
                    let mut model: enrollments::ActiveModel = existing.into();
                    model.name = ActiveValue::Set(checked.name);
                    model.cpf = ActiveValue::Set(checked.cpf);
                    model.birthday = ActiveValue::Set(input.birthday);
                    model.phone = ActiveValue::Set(checked.phone);
                    model.updated_at = ActiveValue::Set(now);
                    model.update(&db_tx).await?
                }
                None => {
                    enrollments::ActiveModel {
                        id: ActiveValue::NotSet,
                        user_id: ActiveValue::Set(user_id),
                        name: ActiveValue::Set(checked.name),
                        cpf: ActiveValue::Set(checked.cpf),
                        birthday: ActiveValue::Set(input.birthday),
                        phone: ActiveValue::Set(checked.phone),
                        created_at: ActiveValue::Set(now),
                        updated_at: ActiveValue::Set(now),
                    }
                    .insert(&db_tx)
                    .await?
                }
            };

            let address = self
                .upsert_address(&db_tx, enrollment.id, checked.address)
                .await?;

            tracing::info!(user_id, enrollment_id = enrollment.id, "enrollment saved");
            Ok(Enrollment::from((enrollment, address)))
        })
    }

    async fn address_of(
        &self,
        db: &DatabaseTransaction,
        enrollment_id: i32,
    ) -> ResultEngine<Address> {
        addresses::Entity::find()
            .filter(addresses::Column::EnrollmentId.eq(enrollment_id))
            .one(db)
            .await?
            .map(Address::from)
            .ok_or_else(|| EngineError::KeyNotFound("address".to_string()))
    }

    async fn upsert_address(
        &self,
        db: &DatabaseTransaction,
        enrollment_id: i32,
        input: CheckedAddress,
    ) -> ResultEngine<Address> {
        let now = Utc::now();
        let existing = addresses::Entity::find()
            .filter(addresses::Column::EnrollmentId.eq(enrollment_id))
            .one(db)
            .await?;

        let model = match existing {
            Some(existing) => {
                let mut model: addresses::ActiveModel = existing.into();
                model.cep = ActiveValue::Set(input.cep);
                model.street = ActiveValue::Set(input.street);
                model.city = ActiveValue::Set(input.city);
                model.number = ActiveValue::Set(input.number);
                model.state = ActiveValue::Set(input.state);
                model.neighborhood = ActiveValue::Set(input.neighborhood);
                model.address_detail = ActiveValue::Set(input.address_detail);
                model.updated_at = ActiveValue::Set(now);
                model.update(db).await?
            }
            None => {
                addresses::ActiveModel {
                    id: ActiveValue::NotSet,
                    enrollment_id: ActiveValue::Set(enrollment_id),
                    cep: ActiveValue::Set(input.cep),
                    street: ActiveValue::Set(input.street),
                    city: ActiveValue::Set(input.city),
                    state: ActiveValue::Set(input.state),
                    number: ActiveValue::Set(input.number),
                    neighborhood: ActiveValue::Set(input.neighborhood),
                    address_detail: ActiveValue::Set(input.address_detail),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(db)
                .await?
            }
        };

        Ok(model.into())
    }
}

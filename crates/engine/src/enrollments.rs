//! Personal data a user must provide before buying a ticket.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::addresses::Address;

/// An enrollment together with its postal address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    pub address: Address,
}

/// Input accepted by [`Engine::upsert_enrollment`].
///
/// [`Engine::upsert_enrollment`]: crate::Engine::upsert_enrollment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEnrollment {
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    pub address: NewAddress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAddress {
    pub cep: String,
    pub street: String,
    pub city: String,
    pub number: String,
    pub state: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub cpf: String,
    pub birthday: DateTimeUtc,
    pub phone: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(has_one = "super::addresses::Entity")]
    Address,
    #[sea_orm(has_one = "super::tickets::Entity")]
    Ticket,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<(Model, Address)> for Enrollment {
    fn from((model, address): (Model, Address)) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            cpf: model.cpf,
            birthday: model.birthday,
            phone: model.phone,
            address,
        }
    }
}

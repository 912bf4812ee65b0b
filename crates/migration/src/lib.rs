pub use sea_orm_migration::prelude::*;

mod m20261001_000000_accounts;
mod m20261002_000000_tickets;
mod m20261003_000000_lodging;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000000_accounts::Migration),
            Box::new(m20261002_000000_tickets::Migration),
            Box::new(m20261003_000000_lodging::Migration),
        ]
    }
}

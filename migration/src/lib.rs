pub use sea_orm_migration::prelude::*;

mod m20251029_000001_create_catalog;
mod m20251029_000002_create_reviews_and_opinions;
mod m20251030_000001_create_opinion_votes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251029_000001_create_catalog::Migration),
            Box::new(m20251029_000002_create_reviews_and_opinions::Migration),
            Box::new(m20251030_000001_create_opinion_votes::Migration),
        ]
    }
}

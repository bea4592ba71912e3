pub use sea_orm_migration::prelude::*;

mod m20250110_000001_prepared_data;
mod m20250110_000002_fitness_data;
mod m20250112_000001_fitness_data_user_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_prepared_data::Migration),
            Box::new(m20250110_000002_fitness_data::Migration),
            Box::new(m20250112_000001_fitness_data_user_index::Migration),
        ]
    }
}

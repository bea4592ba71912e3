use sea_orm_migration::prelude::*;

use crate::m20250110_000002_fitness_data::FitnessData;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_fitness_data_user_created")
                    .table(FitnessData::Table)
                    .col(FitnessData::UserId)
                    .col(FitnessData::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_fitness_data_user_created")
                    .table(FitnessData::Table)
                    .to_owned(),
            )
            .await
    }
}

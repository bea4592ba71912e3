use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FitnessData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FitnessData::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FitnessData::UserId).string_len(64).not_null())
                    .col(ColumnDef::new(FitnessData::DataType).string_len(16).not_null())
                    .col(ColumnDef::new(FitnessData::Data).json().not_null())
                    .col(ColumnDef::new(FitnessData::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FitnessData::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FitnessData {
    Table,
    Id,
    UserId,
    DataType,
    Data,
    CreatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PreparedData::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PreparedData::UserId).big_integer().not_null())
                    .col(ColumnDef::new(PreparedData::ActivityDate).date().not_null())
                    .col(ColumnDef::new(PreparedData::TotalSteps).integer().not_null())
                    .col(ColumnDef::new(PreparedData::TotalDistance).double().not_null())
                    .col(
                        ColumnDef::new(PreparedData::VeryActiveMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PreparedData::FairlyActiveMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PreparedData::LightlyActiveMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PreparedData::SedentaryMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PreparedData::Calories).integer().not_null())
                    .col(
                        ColumnDef::new(PreparedData::TotalSleepRecords)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PreparedData::TotalMinutesAsleep)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PreparedData::TotalTimeInBed)
                            .integer()
                            .not_null(),
                    )
                    // missing until measured or imputed
                    .col(ColumnDef::new(PreparedData::RestingHeartRate).double().null())
                    .col(ColumnDef::new(PreparedData::ReadinessScore).double().null())
                    .primary_key(
                        Index::create()
                            .name("prepared_data_pk")
                            .col(PreparedData::UserId)
                            .col(PreparedData::ActivityDate),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PreparedData::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PreparedData {
    Table,
    UserId,
    ActivityDate,
    TotalSteps,
    TotalDistance,
    VeryActiveMinutes,
    FairlyActiveMinutes,
    LightlyActiveMinutes,
    SedentaryMinutes,
    Calories,
    TotalSleepRecords,
    TotalMinutesAsleep,
    TotalTimeInBed,
    RestingHeartRate,
    ReadinessScore,
}

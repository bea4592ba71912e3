use sea_orm::entity::prelude::*;

/// One merged (user, day) row, keyed by user and activity date.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "prepared_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub activity_date: Date,
    pub total_steps: i32,
    #[sea_orm(column_type = "Double")]
    pub total_distance: f64,
    pub very_active_minutes: i32,
    pub fairly_active_minutes: i32,
    pub lightly_active_minutes: i32,
    pub sedentary_minutes: i32,
    pub calories: i32,
    pub total_sleep_records: i32,
    pub total_minutes_asleep: i32,
    pub total_time_in_bed: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub resting_heart_rate: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub readiness_score: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

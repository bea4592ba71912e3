use avafr_entities::prepared_data;
use avafr_migration::OnConflict;
use avafr_types::{MergedRecord, UserDay};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::DatabaseHandler;

// SQLite limits to 999 SQL variables: 14 columns -> max 71 rows
const PREPARED_BATCH: usize = 64;

#[derive(Default, Debug)]
pub struct SearchPrepared {
    pub user_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u64>,
}

impl SearchPrepared {
    pub(crate) fn conditions(self) -> Condition {
        Condition::all()
            .add_option(self.user_id.map(|id| prepared_data::Column::UserId.eq(id)))
            .add_option(self.from.map(|from| prepared_data::Column::ActivityDate.gte(from)))
            .add_option(self.to.map(|to| prepared_data::Column::ActivityDate.lte(to)))
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:>14} [{wide_bar:.cyan/dim}] {pos}/{len} ({elapsed}, {eta} remaining)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
}

impl DatabaseHandler {
    /// Upserts merged rows keyed by (user, activity date).
    pub async fn create_prepared_rows(&self, rows: &[MergedRecord]) -> anyhow::Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let pb = ProgressBar::new(rows.len() as u64);
        pb.set_style(bar_style());
        pb.set_prefix("prepared_data");

        for batch in rows.chunks(PREPARED_BATCH) {
            let models = batch.iter().map(to_active_model);

            prepared_data::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        prepared_data::Column::UserId,
                        prepared_data::Column::ActivityDate,
                    ])
                    .update_columns([
                        prepared_data::Column::TotalSteps,
                        prepared_data::Column::TotalDistance,
                        prepared_data::Column::VeryActiveMinutes,
                        prepared_data::Column::FairlyActiveMinutes,
                        prepared_data::Column::LightlyActiveMinutes,
                        prepared_data::Column::SedentaryMinutes,
                        prepared_data::Column::Calories,
                        prepared_data::Column::TotalSleepRecords,
                        prepared_data::Column::TotalMinutesAsleep,
                        prepared_data::Column::TotalTimeInBed,
                        prepared_data::Column::RestingHeartRate,
                        prepared_data::Column::ReadinessScore,
                    ])
                    .to_owned(),
                )
                .exec(&self.db)
                .await?;

            pb.inc(batch.len() as u64);
        }

        pb.finish();
        info!("stored {} prepared rows", rows.len());
        Ok(rows.len())
    }

    pub async fn get_prepared_row(&self, key: UserDay) -> anyhow::Result<Option<MergedRecord>> {
        let row = prepared_data::Entity::find_by_id((key.user_id, key.date))
            .one(&self.db)
            .await?;

        Ok(row.map(map_prepared_row))
    }

    pub async fn search_prepared(
        &self,
        options: SearchPrepared,
    ) -> anyhow::Result<Vec<MergedRecord>> {
        let limit = options.limit;
        let rows = prepared_data::Entity::find()
            .filter(options.conditions())
            .order_by_asc(prepared_data::Column::UserId)
            .order_by_asc(prepared_data::Column::ActivityDate)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_prepared_row)
            .collect();

        Ok(rows)
    }

    pub async fn delete_prepared_rows(&self) -> anyhow::Result<u64> {
        let result = prepared_data::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

fn to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn from_db(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

fn to_active_model(row: &MergedRecord) -> prepared_data::ActiveModel {
    prepared_data::ActiveModel {
        user_id: Set(row.user_id),
        activity_date: Set(row.date),
        total_steps: Set(to_db(row.total_steps)),
        total_distance: Set(row.total_distance),
        very_active_minutes: Set(to_db(row.very_active_minutes)),
        fairly_active_minutes: Set(to_db(row.fairly_active_minutes)),
        lightly_active_minutes: Set(to_db(row.lightly_active_minutes)),
        sedentary_minutes: Set(to_db(row.sedentary_minutes)),
        calories: Set(to_db(row.calories)),
        total_sleep_records: Set(to_db(row.total_sleep_records)),
        total_minutes_asleep: Set(to_db(row.total_minutes_asleep)),
        total_time_in_bed: Set(to_db(row.total_time_in_bed)),
        resting_heart_rate: Set(row.resting_heart_rate),
        readiness_score: Set(row.readiness_score),
    }
}

fn map_prepared_row(value: prepared_data::Model) -> MergedRecord {
    MergedRecord {
        user_id: value.user_id,
        date: value.activity_date,
        total_steps: from_db(value.total_steps),
        total_distance: value.total_distance,
        very_active_minutes: from_db(value.very_active_minutes),
        fairly_active_minutes: from_db(value.fairly_active_minutes),
        lightly_active_minutes: from_db(value.lightly_active_minutes),
        sedentary_minutes: from_db(value.sedentary_minutes),
        calories: from_db(value.calories),
        total_sleep_records: from_db(value.total_sleep_records),
        total_minutes_asleep: from_db(value.total_minutes_asleep),
        total_time_in_bed: from_db(value.total_time_in_bed),
        resting_heart_rate: value.resting_heart_rate,
        readiness_score: value.readiness_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 4, d).unwrap()
    }

    fn row(user_id: i64, d: u32, resting: Option<f64>) -> MergedRecord {
        MergedRecord {
            user_id,
            date: day(d),
            total_steps: 9000,
            total_distance: 6.1,
            very_active_minutes: 20,
            fairly_active_minutes: 10,
            lightly_active_minutes: 150,
            sedentary_minutes: 800,
            calories: 2100,
            total_sleep_records: 1,
            total_minutes_asleep: 420,
            total_time_in_bed: 450,
            resting_heart_rate: resting,
            readiness_score: resting.map(|_| 66.6),
        }
    }

    #[test]
    fn model_mapping_keeps_missing_values() {
        let original = row(5, 12, None);
        assert_eq!(map_prepared_row(prepared_model(&original)), original);
    }

    fn prepared_model(row: &MergedRecord) -> prepared_data::Model {
        prepared_data::Model {
            user_id: row.user_id,
            activity_date: row.date,
            total_steps: to_db(row.total_steps),
            total_distance: row.total_distance,
            very_active_minutes: to_db(row.very_active_minutes),
            fairly_active_minutes: to_db(row.fairly_active_minutes),
            lightly_active_minutes: to_db(row.lightly_active_minutes),
            sedentary_minutes: to_db(row.sedentary_minutes),
            calories: to_db(row.calories),
            total_sleep_records: to_db(row.total_sleep_records),
            total_minutes_asleep: to_db(row.total_minutes_asleep),
            total_time_in_bed: to_db(row.total_time_in_bed),
            resting_heart_rate: row.resting_heart_rate,
            readiness_score: row.readiness_score,
        }
    }

    #[tokio::test]
    async fn lookup_by_key() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        db.create_prepared_rows(&[row(1, 12, Some(52.0)), row(1, 13, None)])
            .await
            .unwrap();

        let found = db.get_prepared_row(UserDay::new(1, day(12))).await.unwrap();
        assert_eq!(found.unwrap().resting_heart_rate, Some(52.0));

        // stored without a reading: the row exists, the value stays missing
        let missing = db.get_prepared_row(UserDay::new(1, day(13))).await.unwrap();
        assert_eq!(missing.unwrap().resting_heart_rate, None);

        let absent = db.get_prepared_row(UserDay::new(2, day(12))).await.unwrap();
        assert!(absent.is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_derived_values() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        db.create_prepared_rows(&[row(1, 12, None)]).await.unwrap();
        db.create_prepared_rows(&[row(1, 12, Some(48.0))]).await.unwrap();

        let rows = db.search_prepared(SearchPrepared::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].resting_heart_rate, Some(48.0));
        assert_eq!(rows[0].readiness_score, Some(66.6));
    }

    #[tokio::test]
    async fn large_inserts_are_batched() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        let rows = (1..=250)
            .map(|user| row(user, 12, Some(50.0)))
            .collect::<Vec<_>>();

        assert_eq!(db.create_prepared_rows(&rows).await.unwrap(), 250);
        let stored = db.search_prepared(SearchPrepared::default()).await.unwrap();
        assert_eq!(stored.len(), 250);
    }

    #[tokio::test]
    async fn search_filters() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();
        let rows = [1, 2]
            .into_iter()
            .flat_map(|user| (10..=14).map(move |d| row(user, d, Some(50.0))))
            .collect::<Vec<_>>();
        db.create_prepared_rows(&rows).await.unwrap();

        let user = db
            .search_prepared(SearchPrepared {
                user_id: Some(2),
                from: Some(day(11)),
                to: Some(day(13)),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(
            user.iter().map(|r| r.date).collect::<Vec<_>>(),
            vec![day(11), day(12), day(13)]
        );

        let limited = db
            .search_prepared(SearchPrepared {
                limit: Some(4),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 4);

        assert_eq!(db.delete_prepared_rows().await.unwrap(), 10);
        assert!(db.search_prepared(SearchPrepared::default()).await.unwrap().is_empty());
    }
}

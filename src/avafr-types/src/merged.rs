use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ActivityRecord, SleepRecord, UserDay};

/// One (user, day) that has both an activity and a sleep record, plus the
/// values the pipeline derives for it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub user_id: i64,
    pub date: NaiveDate,
    pub total_steps: u32,
    pub total_distance: f64,
    pub very_active_minutes: u32,
    pub fairly_active_minutes: u32,
    pub lightly_active_minutes: u32,
    pub sedentary_minutes: u32,
    pub calories: u32,
    pub total_sleep_records: u32,
    pub total_minutes_asleep: u32,
    pub total_time_in_bed: u32,
    pub resting_heart_rate: Option<f64>,
    pub readiness_score: Option<f64>,
}

impl MergedRecord {
    pub fn join(activity: &ActivityRecord, sleep: &SleepRecord) -> Self {
        debug_assert_eq!(activity.key(), sleep.key());

        Self {
            user_id: activity.user_id,
            date: activity.date,
            total_steps: activity.total_steps,
            total_distance: activity.total_distance,
            very_active_minutes: activity.very_active_minutes,
            fairly_active_minutes: activity.fairly_active_minutes,
            lightly_active_minutes: activity.lightly_active_minutes,
            sedentary_minutes: activity.sedentary_minutes,
            calories: activity.calories,
            total_sleep_records: sleep.total_sleep_records,
            total_minutes_asleep: sleep.total_minutes_asleep,
            total_time_in_bed: sleep.total_time_in_bed,
            resting_heart_rate: None,
            readiness_score: None,
        }
    }

    pub fn key(&self) -> UserDay {
        UserDay::new(self.user_id, self.date)
    }

    pub fn total_active_minutes(&self) -> u32 {
        self.very_active_minutes
            .saturating_add(self.fairly_active_minutes)
            .saturating_add(self.lightly_active_minutes)
    }
}

use avafr_types::{ActivityRecord, MergedRecord, SleepRecord};
use chrono::NaiveDate;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 4, d).unwrap()
}

pub fn activity(user_id: i64, d: u32, lightly: u32) -> ActivityRecord {
    ActivityRecord {
        user_id,
        date: day(d),
        total_steps: 8000,
        total_distance: 5.5,
        very_active_minutes: 20,
        fairly_active_minutes: 10,
        lightly_active_minutes: lightly,
        sedentary_minutes: 800,
        calories: 2000,
    }
}

pub fn sleep(user_id: i64, d: u32, asleep: u32) -> SleepRecord {
    SleepRecord {
        user_id,
        date: day(d),
        total_sleep_records: 1,
        total_minutes_asleep: asleep,
        total_time_in_bed: asleep + 30,
    }
}

pub fn row(user_id: i64, d: u32, lightly: u32, asleep: u32, resting: Option<f64>) -> MergedRecord {
    MergedRecord {
        resting_heart_rate: resting,
        ..MergedRecord::join(&activity(user_id, d, lightly), &sleep(user_id, d, asleep))
    }
}

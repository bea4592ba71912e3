use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::UserDay;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub user_id: i64,
    pub date: NaiveDate,
    pub total_sleep_records: u32,
    pub total_minutes_asleep: u32,
    pub total_time_in_bed: u32,
}

impl SleepRecord {
    pub fn key(&self) -> UserDay {
        UserDay::new(self.user_id, self.date)
    }
}

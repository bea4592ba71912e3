use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::UserDay;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub user_id: i64,
    pub date: NaiveDate,
    pub total_steps: u32,
    pub total_distance: f64,
    pub very_active_minutes: u32,
    pub fairly_active_minutes: u32,
    pub lightly_active_minutes: u32,
    pub sedentary_minutes: u32,
    pub calories: u32,
}

impl ActivityRecord {
    pub fn key(&self) -> UserDay {
        UserDay::new(self.user_id, self.date)
    }

    /// Very + fairly + lightly active minutes. Sedentary time does not count.
    pub fn total_active_minutes(&self) -> u32 {
        self.very_active_minutes
            .saturating_add(self.fairly_active_minutes)
            .saturating_add(self.lightly_active_minutes)
    }
}

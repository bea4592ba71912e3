use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::UserDay;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub user_id: i64,
    pub time: NaiveDateTime,
    pub value: u16,
}

impl HeartRateSample {
    /// The sleep day whose `[00:00, next 00:00)` window contains this sample.
    pub fn key(&self) -> UserDay {
        UserDay::new(self.user_id, self.time.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn midnight_belongs_to_new_day() {
        let time = NaiveDate::from_ymd_opt(2016, 4, 13)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let sample = HeartRateSample {
            user_id: 7,
            time,
            value: 55,
        };

        assert_eq!(sample.key().date, NaiveDate::from_ymd_opt(2016, 4, 13).unwrap());
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Join key shared by every per-day dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserDay {
    pub user_id: i64,
    pub date: NaiveDate,
}

impl UserDay {
    pub fn new(user_id: i64, date: NaiveDate) -> Self {
        Self { user_id, date }
    }
}

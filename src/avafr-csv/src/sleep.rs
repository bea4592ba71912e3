use std::path::Path;

use avafr_types::SleepRecord;

use crate::{CsvError, Loaded, table::read_rows};

const REQUIRED: [&str; 4] = ["Id", "SleepDay", "TotalMinutesAsleep", "TotalTimeInBed"];

/// Loads a `sleepDay` export. `SleepDay` carries a time of day that is
/// dropped; records are keyed by calendar day.
pub fn load_sleep(path: impl AsRef<Path>) -> Result<Loaded<SleepRecord>, CsvError> {
    read_rows(path.as_ref(), &REQUIRED, |row| {
        Ok(SleepRecord {
            user_id: row.user_id("Id")?,
            date: row.date("SleepDay")?,
            total_sleep_records: row.count_or_zero("TotalSleepRecords")?,
            total_minutes_asleep: row.minutes("TotalMinutesAsleep")?,
            total_time_in_bed: row.minutes("TotalTimeInBed")?,
        })
    })
}

use std::path::Path;

use avafr_types::MergedRecord;

use crate::{CsvError, Loaded, table::read_rows};

const HEADER: [&str; 14] = [
    "Id",
    "ActivityDate",
    "TotalSteps",
    "TotalDistance",
    "VeryActiveMinutes",
    "FairlyActiveMinutes",
    "LightlyActiveMinutes",
    "SedentaryMinutes",
    "Calories",
    "TotalSleepRecords",
    "TotalMinutesAsleep",
    "TotalTimeInBed",
    "RestingHeartRate",
    "ReadinessScore",
];

const REQUIRED: [&str; 7] = [
    "Id",
    "ActivityDate",
    "VeryActiveMinutes",
    "FairlyActiveMinutes",
    "LightlyActiveMinutes",
    "SedentaryMinutes",
    "TotalMinutesAsleep",
];

/// Loads an already-merged table, such as a previous `write_prepared`
/// output or a synthetic dataset. Empty `RestingHeartRate` cells are kept as
/// missing values; any stored `ReadinessScore` is ignored.
pub fn load_prepared(path: impl AsRef<Path>) -> Result<Loaded<MergedRecord>, CsvError> {
    read_rows(path.as_ref(), &REQUIRED, |row| {
        let resting_heart_rate = row
            .optional("RestingHeartRate")
            .map(|value| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| format!("invalid RestingHeartRate `{value}`"))
            })
            .transpose()?;

        Ok(MergedRecord {
            user_id: row.user_id("Id")?,
            date: row.date("ActivityDate")?,
            total_steps: row.count_or_zero("TotalSteps")?,
            total_distance: row.float_or_zero("TotalDistance")?,
            very_active_minutes: row.minutes("VeryActiveMinutes")?,
            fairly_active_minutes: row.minutes("FairlyActiveMinutes")?,
            lightly_active_minutes: row.minutes("LightlyActiveMinutes")?,
            sedentary_minutes: row.minutes("SedentaryMinutes")?,
            calories: row.count_or_zero("Calories")?,
            total_sleep_records: row.count_or_zero("TotalSleepRecords")?,
            total_minutes_asleep: row.minutes("TotalMinutesAsleep")?,
            total_time_in_bed: row.count_or_zero("TotalTimeInBed")?,
            resting_heart_rate,
            readiness_score: None,
        })
    })
}

/// Writes merged rows, leaving missing values as empty cells. Floats are
/// written at full precision so a table loads back unchanged.
pub fn write_prepared(path: impl AsRef<Path>, rows: &[MergedRecord]) -> Result<(), CsvError> {
    let path = path.as_ref();
    let csv_error = |source| CsvError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(HEADER).map_err(csv_error)?;

    let optional = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    for row in rows {
        writer
            .write_record([
                row.user_id.to_string(),
                row.date.format("%Y-%m-%d").to_string(),
                row.total_steps.to_string(),
                row.total_distance.to_string(),
                row.very_active_minutes.to_string(),
                row.fairly_active_minutes.to_string(),
                row.lightly_active_minutes.to_string(),
                row.sedentary_minutes.to_string(),
                row.calories.to_string(),
                row.total_sleep_records.to_string(),
                row.total_minutes_asleep.to_string(),
                row.total_time_in_bed.to_string(),
                optional(row.resting_heart_rate),
                optional(row.readiness_score),
            ])
            .map_err(csv_error)?;
    }

    writer.flush().map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })
}

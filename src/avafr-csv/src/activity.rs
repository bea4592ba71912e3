use std::path::Path;

use avafr_types::ActivityRecord;

use crate::{CsvError, Loaded, table::read_rows};

const REQUIRED: [&str; 8] = [
    "Id",
    "ActivityDate",
    "TotalSteps",
    "VeryActiveMinutes",
    "FairlyActiveMinutes",
    "LightlyActiveMinutes",
    "SedentaryMinutes",
    "Calories",
];

/// Loads a `dailyActivity` export.
pub fn load_activity(path: impl AsRef<Path>) -> Result<Loaded<ActivityRecord>, CsvError> {
    read_rows(path.as_ref(), &REQUIRED, |row| {
        Ok(ActivityRecord {
            user_id: row.user_id("Id")?,
            date: row.date("ActivityDate")?,
            total_steps: row.count("TotalSteps")?,
            total_distance: row.float_or_zero("TotalDistance")?,
            very_active_minutes: row.minutes("VeryActiveMinutes")?,
            fairly_active_minutes: row.minutes("FairlyActiveMinutes")?,
            lightly_active_minutes: row.minutes("LightlyActiveMinutes")?,
            sedentary_minutes: row.minutes("SedentaryMinutes")?,
            calories: row.count("Calories")?,
        })
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::test_files::csv_file;

    #[test]
    fn loads_fitbit_export() {
        let file = csv_file(
            "Id,ActivityDate,TotalSteps,TotalDistance,TrackerDistance,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories\n\
             1503960366,4/12/2016,13162,8.5,8.5,25,13,328,728,1985\n\
             1503960366,4/13/2016,10735,6.96999979019165,6.96999979019165,21,19,217,776,1797\n",
        );

        let loaded = load_activity(file.path()).unwrap();
        assert_eq!(loaded.rows_read, 2);
        assert_eq!(loaded.skipped, 0);

        let first = loaded.records[0];
        assert_eq!(first.user_id, 1503960366);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2016, 4, 12).unwrap());
        assert_eq!(first.total_active_minutes(), 25 + 13 + 328);
        assert_eq!(first.sedentary_minutes, 728);
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let file = csv_file(
            " Id , ActivityDate ,TotalSteps,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories\n\
             1,4/12/2016,100,1,2,3,4,5\n",
        );

        let loaded = load_activity(file.path()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].total_distance, 0.0);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let file = csv_file(
            "Id,ActivityDate,TotalSteps,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories\n\
             1,4/12/2016,100,1,2,3,4,5\n\
             1,not-a-date,100,1,2,3,4,5\n\
             1,4/14/2016,lots,1,2,3,4,5\n\
             2,4/12/2016,200,1,2,3,4,5\n",
        );

        let loaded = load_activity(file.path()).unwrap();
        assert_eq!(loaded.rows_read, 4);
        assert_eq!(loaded.skipped, 2);
        assert_eq!(loaded.records.len(), 2);
    }

    #[test]
    fn minutes_beyond_one_day_are_skipped() {
        let file = csv_file(
            "Id,ActivityDate,TotalSteps,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories\n\
             1,4/12/2016,100,3000000000,3000000000,3,4,5\n\
             1,4/13/2016,100,1440,0,0,0,5\n",
        );

        let loaded = load_activity(file.path()).unwrap();
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].very_active_minutes, 1440);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = csv_file("Id,ActivityDate\n1,4/12/2016\n");

        let err = load_activity(file.path()).unwrap_err();
        assert!(matches!(
            err,
            CsvError::MissingColumn {
                column: "TotalSteps",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_activity("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, CsvError::FileNotFound(_)));
    }
}

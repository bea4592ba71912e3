//! Text report written at the end of an analysis run.

use std::{collections::BTreeMap, fmt::Display, fs, path::Path};

use anyhow::Context;
use avafr_algos::{
    Recommendation,
    stats::{Column, CorrelationMatrix, Description, correlation_matrix, describe},
};
use avafr_types::MergedRecord;

pub const DEFAULT_REPORT_PATH: &str = "readiness_score_results.txt";
pub const DEFAULT_ANALYSIS_PATH: &str = "data_analysis_results.txt";

const FORMULA: &str = "Readiness Score = ((TotalMinutesAsleep / max_sleep) * 0.4) + \
    ((TotalActiveMinutes / max_active_minutes) * 0.3) + \
    (((max_hr - RestingHeartRate) / (max_hr - min_hr)) * 0.3)) * 100";

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub rows: usize,
    pub scored: usize,
    pub imputed: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub recommendations: BTreeMap<Recommendation, usize>,
}

impl ScoreSummary {
    fn of(rows: &[MergedRecord], imputed: usize) -> Self {
        let scores = rows
            .iter()
            .filter_map(|r| r.readiness_score)
            .collect::<Vec<_>>();

        let mut recommendations = Recommendation::ALL
            .into_iter()
            .map(|r| (r, 0))
            .collect::<BTreeMap<_, _>>();
        for score in &scores {
            *recommendations
                .entry(Recommendation::from_score(*score))
                .or_default() += 1;
        }

        let mean = (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);

        Self {
            rows: rows.len(),
            scored: scores.len(),
            imputed,
            mean,
            min: scores.iter().copied().reduce(f64::min),
            max: scores.iter().copied().reduce(f64::max),
            recommendations,
        }
    }
}

impl Display for ScoreSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Scored rows: {}", self.scored)?;
        writeln!(f, "Imputed resting heart rates: {}", self.imputed)?;
        match (self.mean, self.min, self.max) {
            (Some(mean), Some(min), Some(max)) => {
                writeln!(f, "Mean score: {mean:.2}")?;
                writeln!(f, "Min score: {min:.2}")?;
                writeln!(f, "Max score: {max:.2}")?;
            }
            _ => writeln!(f, "No rows could be scored")?,
        }
        for (recommendation, count) in &self.recommendations {
            writeln!(f, "{recommendation}: {count}")?;
        }
        Ok(())
    }
}

/// Correlation between the scored inputs, the score summary and the formula.
#[derive(Debug, Clone)]
pub struct ReadinessReport {
    pub correlation: CorrelationMatrix,
    pub summary: ScoreSummary,
}

impl ReadinessReport {
    pub fn new(rows: &[MergedRecord], imputed: usize) -> Self {
        let columns = [
            Column::new(
                "TotalMinutesAsleep",
                rows.iter().map(|r| Some(f64::from(r.total_minutes_asleep))),
            ),
            Column::new(
                "TotalActiveMinutes",
                rows.iter().map(|r| Some(f64::from(r.total_active_minutes()))),
            ),
            Column::new(
                "RestingHeartRate",
                rows.iter().map(|r| r.resting_heart_rate),
            ),
        ];

        Self {
            correlation: correlation_matrix(&columns),
            summary: ScoreSummary::of(rows, imputed),
        }
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string())
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

impl Display for ReadinessReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Correlation Matrix ---")?;
        writeln!(f, "{}", self.correlation)?;
        writeln!(f)?;
        writeln!(f, "--- Readiness Score Summary ---")?;
        write!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "--- Readiness Score Logic ---")?;
        writeln!(f, "{FORMULA}")
    }
}

/// Description and full correlation matrix of every numeric column of a
/// prepared table.
#[derive(Debug, Clone)]
pub struct DataAnalysis {
    pub description: Description,
    pub correlation: CorrelationMatrix,
}

impl DataAnalysis {
    pub fn new(rows: &[MergedRecord]) -> Self {
        let count = |f: fn(&MergedRecord) -> u32| {
            rows.iter().map(move |r| Some(f64::from(f(r))))
        };
        let columns = [
            Column::new("TotalSteps", count(|r| r.total_steps)),
            Column::new("TotalDistance", rows.iter().map(|r| Some(r.total_distance))),
            Column::new("VeryActiveMinutes", count(|r| r.very_active_minutes)),
            Column::new("FairlyActiveMinutes", count(|r| r.fairly_active_minutes)),
            Column::new("LightlyActiveMinutes", count(|r| r.lightly_active_minutes)),
            Column::new("SedentaryMinutes", count(|r| r.sedentary_minutes)),
            Column::new("Calories", count(|r| r.calories)),
            Column::new("TotalMinutesAsleep", count(|r| r.total_minutes_asleep)),
            Column::new("TotalTimeInBed", count(|r| r.total_time_in_bed)),
            Column::new("RestingHeartRate", rows.iter().map(|r| r.resting_heart_rate)),
            Column::new("ReadinessScore", rows.iter().map(|r| r.readiness_score)),
        ];

        Self {
            description: describe(&columns),
            correlation: correlation_matrix(&columns),
        }
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string())
            .with_context(|| format!("writing analysis to {}", path.display()))?;
        info!("Analysis written to {}", path.display());
        Ok(())
    }
}

impl Display for DataAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Descriptive Statistics ---")?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "--- Correlation Matrix ---")?;
        writeln!(f, "{}", self.correlation)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(d: u32, asleep: u32, lightly: u32, resting: Option<f64>, score: Option<f64>) -> MergedRecord {
        MergedRecord {
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2016, 4, d).unwrap(),
            total_steps: 0,
            total_distance: 0.0,
            very_active_minutes: 0,
            fairly_active_minutes: 0,
            lightly_active_minutes: lightly,
            sedentary_minutes: 900,
            calories: 2000,
            total_sleep_records: 1,
            total_minutes_asleep: asleep,
            total_time_in_bed: asleep + 30,
            resting_heart_rate: resting,
            readiness_score: score,
        }
    }

    #[test]
    fn sections_in_order() {
        let rows = vec![
            row(1, 400, 100, Some(50.0), Some(85.0)),
            row(2, 300, 200, Some(55.0), Some(62.0)),
            row(3, 500, 150, Some(45.0), Some(30.0)),
            row(4, 420, 120, None, None),
        ];
        let text = ReadinessReport::new(&rows, 1).to_string();

        let correlation = text.find("--- Correlation Matrix ---").unwrap();
        let summary = text.find("--- Readiness Score Summary ---").unwrap();
        let logic = text.find("--- Readiness Score Logic ---").unwrap();
        assert!(correlation < summary && summary < logic);

        assert!(text.contains("TotalActiveMinutes"));
        assert!(text.contains("Rows: 4"));
        assert!(text.contains("Scored rows: 3"));
        assert!(text.contains("Imputed resting heart rates: 1"));
        assert!(text.contains("Max score: 85.00"));
        assert!(text.contains("high intensity: 1"));
        assert!(text.contains("light: 0"));
        assert!(text.contains("rest: 1"));
        assert!(text.ends_with(&format!("{FORMULA}\n")));
    }

    #[test]
    fn diagonal_and_missing_resting_heart_rate() {
        let rows = vec![
            row(1, 400, 100, Some(50.0), None),
            row(2, 300, 200, Some(55.0), None),
            row(3, 500, 150, None, None),
        ];
        let report = ReadinessReport::new(&rows, 0);

        let m = &report.correlation;
        assert_eq!(m.get("TotalMinutesAsleep", "TotalMinutesAsleep"), Some(1.0));
        // pairwise-complete: the two rows with a heart rate are perfectly anti-correlated
        let r = m.get("TotalMinutesAsleep", "RestingHeartRate").unwrap();
        assert!((r + 1.0).abs() < 1e-9, "got {r}");

        assert_eq!(report.summary.scored, 0);
        assert_eq!(report.summary.mean, None);
        assert!(report.to_string().contains("No rows could be scored"));
    }

    #[test]
    fn write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_PATH);
        let report = ReadinessReport::new(&[row(1, 400, 100, Some(50.0), Some(70.0))], 0);

        report.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), report.to_string());
    }

    #[test]
    fn analysis_covers_every_numeric_column() {
        let rows = vec![
            row(1, 400, 100, Some(50.0), Some(85.0)),
            row(2, 300, 200, None, None),
            row(3, 500, 150, Some(45.0), Some(30.0)),
        ];
        let analysis = DataAnalysis::new(&rows);

        assert_eq!(analysis.description.labels.len(), 11);
        assert_eq!(analysis.correlation.labels, analysis.description.labels);

        let asleep = analysis.description.labels.iter().position(|l| l == "TotalMinutesAsleep").unwrap();
        assert_eq!(analysis.description.summaries[asleep].count, 3);
        assert_eq!(analysis.description.summaries[asleep].q50, Some(400.0));

        let resting = analysis.description.labels.iter().position(|l| l == "RestingHeartRate").unwrap();
        assert_eq!(analysis.description.summaries[resting].count, 2);

        // no variance in sedentary minutes
        assert_eq!(analysis.correlation.get("SedentaryMinutes", "Calories"), None);

        let text = analysis.to_string();
        assert!(text.starts_with("--- Descriptive Statistics ---"));
        assert!(text.contains("--- Correlation Matrix ---"));
    }
}

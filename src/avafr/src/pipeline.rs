use std::path::PathBuf;

use anyhow::Context;
use avafr_algos::{KnnImputer, ReadinessBounds, RestingHeartRate, merge, score_rows};
use avafr_csv::{DEFAULT_CHUNK_SIZE, HeartRateReader, load_activity, load_sleep};
use avafr_types::MergedRecord;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub activity: PathBuf,
    pub sleep: PathBuf,
    pub heart_rate: PathBuf,
    pub chunk_size: usize,
    pub neighbours: usize,
}

impl PipelineConfig {
    pub fn new(
        activity: impl Into<PathBuf>,
        sleep: impl Into<PathBuf>,
        heart_rate: impl Into<PathBuf>,
    ) -> Self {
        Self {
            activity: activity.into(),
            sleep: sleep.into(),
            heart_rate: heart_rate.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            neighbours: KnnImputer::DEFAULT_K,
        }
    }
}

/// Row counts collected along the way, for the report and the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineCounts {
    pub activity_rows: usize,
    pub sleep_rows: usize,
    pub heart_rate_rows: usize,
    pub skipped_rows: usize,
    pub merged: usize,
    pub measured: usize,
    pub imputed: usize,
    pub scored: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub rows: Vec<MergedRecord>,
    pub resting_heart_rate: RestingHeartRate,
    pub bounds: Option<ReadinessBounds>,
    pub counts: PipelineCounts,
}

pub struct ReadinessPipeline {
    config: PipelineConfig,
}

impl ReadinessPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Load, merge, extract resting heart rate, impute, score. Any missing
    /// input aborts the run before anything is produced.
    pub fn run(&self) -> anyhow::Result<PipelineOutput> {
        let config = &self.config;

        let activity = load_activity(&config.activity).context("loading daily activity")?;
        let sleep = load_sleep(&config.sleep).context("loading sleep days")?;

        let mut rows = merge(&activity.records, &sleep.records);
        let mut resting_heart_rate = RestingHeartRate::for_rows(&rows);

        let mut reader = HeartRateReader::open(&config.heart_rate, config.chunk_size)
            .context("opening heart rate samples")?;
        for (i, chunk) in reader.by_ref().enumerate() {
            info!("Processing heart rate chunk {} ({} samples)", i, chunk.len());
            resting_heart_rate.update(&chunk);
        }

        let measured = resting_heart_rate.apply(&mut rows);
        let imputed = KnnImputer::new(config.neighbours).impute(&mut rows);
        let bounds = score_rows(&mut rows);

        let counts = PipelineCounts {
            activity_rows: activity.rows_read,
            sleep_rows: sleep.rows_read,
            heart_rate_rows: reader.rows_read(),
            skipped_rows: activity.skipped + sleep.skipped + reader.skipped(),
            merged: rows.len(),
            measured,
            imputed,
            scored: scored(&rows),
        };

        info!(
            "{} days merged, {} measured, {} imputed, {} scored",
            counts.merged, counts.measured, counts.imputed, counts.scored
        );
        if counts.skipped_rows > 0 {
            warn!("{} malformed input rows were skipped", counts.skipped_rows);
        }

        Ok(PipelineOutput {
            rows,
            resting_heart_rate,
            bounds,
            counts,
        })
    }
}

/// Imputes and scores an already-merged table in place.
pub fn score_prepared(rows: &mut [MergedRecord], neighbours: usize) -> PipelineCounts {
    let measured = rows.iter().filter(|r| r.resting_heart_rate.is_some()).count();
    let imputed = KnnImputer::new(neighbours).impute(rows);
    score_rows(rows);

    PipelineCounts {
        merged: rows.len(),
        measured,
        imputed,
        scored: scored(rows),
        ..Default::default()
    }
}

fn scored(rows: &[MergedRecord]) -> usize {
    rows.iter().filter(|r| r.readiness_score.is_some()).count()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::{fs, path::Path};

    use super::PipelineConfig;

    pub const ACTIVITY: &str = "Id,ActivityDate,TotalSteps,TotalDistance,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories\n\
        1,4/12/2016,9000,6.0,20,10,150,800,2000\n\
        1,4/13/2016,12000,8.0,40,20,240,700,2400\n\
        1,4/14/2016,3000,2.0,0,5,60,1100,1700\n\
        2,4/12/2016,7000,5.0,10,10,130,900,1900\n\
        2,4/12/2016,7000,5.0,10,10,130,900,1900\n\
        2,4/15/2016,8000,5.5,15,15,140,850,2000\n";

    pub const SLEEP: &str = "Id,SleepDay,TotalSleepRecords,TotalMinutesAsleep,TotalTimeInBed\n\
        1,4/12/2016 12:00:00 AM,1,420,450\n\
        1,4/13/2016 12:00:00 AM,1,500,520\n\
        1,4/14/2016 12:00:00 AM,1,300,330\n\
        2,4/12/2016 12:00:00 AM,1,380,400\n\
        3,4/12/2016 12:00:00 AM,1,410,430\n";

    pub const HEART_RATE: &str = "Id,Time,Value\n\
        1,4/12/2016 2:00:00 AM,55\n\
        1,4/12/2016 3:00:00 AM,50\n\
        1,4/12/2016 11:59:59 PM,52\n\
        1,4/13/2016 12:00:00 AM,40\n\
        1,4/13/2016 4:00:00 AM,44\n\
        1,4/14/2016 4:00:00 AM,60\n\
        1,4/14/2016 5:00:00 AM,62\n\
        2,4/13/2016 1:00:00 AM,48\n\
        3,4/12/2016 1:00:00 AM,47\n";

    pub fn write(dir: &Path) -> PipelineConfig {
        let activity = dir.join("dailyActivity_merged.csv");
        let sleep = dir.join("sleepDay_merged.csv");
        let heart_rate = dir.join("heartrate_seconds_merged.csv");
        fs::write(&activity, ACTIVITY).unwrap();
        fs::write(&sleep, SLEEP).unwrap();
        fs::write(&heart_rate, HEART_RATE).unwrap();
        PipelineConfig::new(activity, sleep, heart_rate)
    }
}

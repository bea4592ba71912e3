//! Normally distributed prepared rows for demos and load testing.

use std::f64::consts::TAU;

use avafr_types::MergedRecord;
use chrono::{Days, NaiveDate};
use rand::Rng;

/// Each synthetic user gets this many consecutive rows.
pub const ROWS_PER_USER: usize = 10;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Mean and standard deviation of one generated column.
#[derive(Debug, Clone, Copy)]
struct Normal {
    mean: f64,
    std: f64,
}

impl Normal {
    const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Box-Muller, clipped at zero.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u1 = 1.0 - rng.random::<f64>();
        let u2 = rng.random::<f64>();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        (self.mean + self.std * z).max(0.0)
    }

    fn count<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.sample(rng).round() as u32
    }

    /// Capped at one day.
    fn minutes<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.count(rng).min(MINUTES_PER_DAY)
    }
}

const TOTAL_STEPS: Normal = Normal::new(7637.0, 3794.0);
const TOTAL_DISTANCE: Normal = Normal::new(5.48, 2.52);
const VERY_ACTIVE: Normal = Normal::new(21.0, 20.0);
const FAIRLY_ACTIVE: Normal = Normal::new(13.0, 15.0);
const LIGHTLY_ACTIVE: Normal = Normal::new(192.0, 88.0);
const SEDENTARY: Normal = Normal::new(991.0, 301.0);
const CALORIES: Normal = Normal::new(2303.0, 529.0);
const MINUTES_ASLEEP: Normal = Normal::new(419.0, 118.0);
const TIME_IN_BED: Normal = Normal::new(458.0, 127.0);
const RESTING_HEART_RATE: Normal = Normal::new(49.0, 5.0);

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// `rows` rows, user ids counting up from 1, each repeated ten times, one
/// calendar day per row starting 2024-01-01. Scores are left empty.
pub fn generate<R: Rng + ?Sized>(rows: usize, rng: &mut R) -> Vec<MergedRecord> {
    let start = start_date();
    (0..rows)
        .map(|i| MergedRecord {
            user_id: (i / ROWS_PER_USER) as i64 + 1,
            date: start + Days::new(i as u64),
            total_steps: TOTAL_STEPS.count(rng),
            total_distance: TOTAL_DISTANCE.sample(rng),
            very_active_minutes: VERY_ACTIVE.minutes(rng),
            fairly_active_minutes: FAIRLY_ACTIVE.minutes(rng),
            lightly_active_minutes: LIGHTLY_ACTIVE.minutes(rng),
            sedentary_minutes: SEDENTARY.minutes(rng),
            calories: CALORIES.count(rng),
            total_sleep_records: 1,
            total_minutes_asleep: MINUTES_ASLEEP.minutes(rng),
            total_time_in_bed: TIME_IN_BED.minutes(rng),
            resting_heart_rate: Some(RESTING_HEART_RATE.sample(rng)),
            readiness_score: None,
        })
        .collect()
}

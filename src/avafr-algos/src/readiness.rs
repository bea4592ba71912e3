use std::fmt::Display;

use avafr_types::MergedRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessScore(pub f64);

/// Batch-wide normalization bounds. Computed once over every row of a run,
/// never per row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessBounds {
    pub sleep_max: f64,
    pub active_max: f64,
    pub hr_min: f64,
    pub hr_max: f64,
}

/// Readiness combines three normalized signals:
/// 1. sleep: `minutes_asleep / sleep_max`, weight 0.4
/// 2. activity: `(very + fairly + lightly) / active_max`, weight 0.3
/// 3. heart rate: `(hr_max - resting_hr) / (hr_max - hr_min)`, weight 0.3
///
/// The weighted sum is scaled to 0-100. More sleep and more activity score
/// higher, a lower resting heart rate scores higher.
impl ReadinessBounds {
    pub const WEIGHT_SLEEP: f64 = 0.4;
    pub const WEIGHT_ACTIVITY: f64 = 0.3;
    pub const WEIGHT_HEART_RATE: f64 = 0.3;

    /// `None` when no row has a resting heart rate, since no score can be
    /// produced then.
    pub fn from_rows(rows: &[MergedRecord]) -> Option<Self> {
        let sleep_max = rows
            .iter()
            .map(|r| f64::from(r.total_minutes_asleep))
            .fold(0.0, f64::max);
        let active_max = rows
            .iter()
            .map(|r| f64::from(r.total_active_minutes()))
            .fold(0.0, f64::max);

        let mut resting = rows.iter().filter_map(|r| r.resting_heart_rate);
        let first = resting.next()?;
        let (hr_min, hr_max) = resting.fold((first, first), |(min, max), hr| (min.min(hr), max.max(hr)));

        Some(Self {
            sleep_max,
            active_max,
            hr_min,
            hr_max,
        })
    }

    pub fn score(&self, row: &MergedRecord) -> Option<ReadinessScore> {
        score(row, self.sleep_max, self.active_max, self.hr_min, self.hr_max).map(ReadinessScore)
    }

    /// Same as [`score`](Self::score) on raw inputs.
    pub fn score_values(&self, minutes_asleep: f64, total_active_minutes: f64, resting_hr: f64) -> f64 {
        let sleep = ratio(minutes_asleep, self.sleep_max);
        let activity = ratio(total_active_minutes, self.active_max);

        // identical resting heart rates everywhere get full credit
        let heart_rate = if self.hr_max == self.hr_min {
            1.0
        } else {
            (self.hr_max - resting_hr) / (self.hr_max - self.hr_min)
        };

        let raw = Self::WEIGHT_SLEEP * sleep
            + Self::WEIGHT_ACTIVITY * activity
            + Self::WEIGHT_HEART_RATE * heart_rate;

        (raw * 100.0).clamp(0.0, 100.0)
    }
}

/// Readiness of one row against batch bounds. Missing resting heart rate
/// gives a missing score rather than zero.
pub fn score(
    row: &MergedRecord,
    sleep_max: f64,
    active_max: f64,
    hr_min: f64,
    hr_max: f64,
) -> Option<f64> {
    let resting_hr = row.resting_heart_rate?;
    let bounds = ReadinessBounds {
        sleep_max,
        active_max,
        hr_min,
        hr_max,
    };

    Some(bounds.score_values(
        f64::from(row.total_minutes_asleep),
        f64::from(row.total_active_minutes()),
        resting_hr,
    ))
}

/// Scores every row in place. Returns the bounds used, or `None` if no row
/// could be scored.
pub fn score_rows(rows: &mut [MergedRecord]) -> Option<ReadinessBounds> {
    let Some(bounds) = ReadinessBounds::from_rows(rows) else {
        for row in rows.iter_mut() {
            row.readiness_score = None;
        }
        return None;
    };

    for row in rows.iter_mut() {
        row.readiness_score = bounds.score(row).map(|s| s.0);
    }

    Some(bounds)
}

fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 { value / max } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Recommendation {
    HighIntensity,
    Moderate,
    Light,
    Rest,
}

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::HighIntensity,
        Recommendation::Moderate,
        Recommendation::Light,
        Recommendation::Rest,
    ];

    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::HighIntensity
        } else if score >= 60.0 {
            Self::Moderate
        } else if score >= 40.0 {
            Self::Light
        } else {
            Self::Rest
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Self::HighIntensity => "You're in peak condition! Go for a high-intensity workout.",
            Self::Moderate => "Feeling good! A moderate workout would be great today.",
            Self::Light => "Take it easy. A light workout or a walk is a good choice.",
            Self::Rest => "Your body needs rest. Consider a recovery day.",
        }
    }
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::HighIntensity => "high intensity",
            Self::Moderate => "moderate",
            Self::Light => "light",
            Self::Rest => "rest",
        })
    }
}

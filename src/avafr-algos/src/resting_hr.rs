use std::collections::{HashMap, HashSet};

use avafr_types::{HeartRateSample, MergedRecord, UserDay};

/// Running minimum heart rate per (user, sleep day), scoped to one pipeline
/// run.
///
/// The sleep window of a day is `[date 00:00, date + 1 00:00)`, so a sample
/// belongs to the key formed by its user and calendar date. Only days
/// registered as targets are tracked. A day with no sample stays absent;
/// it never reads as zero.
#[derive(Debug, Default, Clone)]
pub struct RestingHeartRate {
    targets: HashSet<UserDay>,
    minimums: HashMap<UserDay, u16>,
}

impl RestingHeartRate {
    pub fn new(targets: impl IntoIterator<Item = UserDay>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            minimums: HashMap::new(),
        }
    }

    pub fn for_rows(rows: &[MergedRecord]) -> Self {
        Self::new(rows.iter().map(MergedRecord::key))
    }

    /// Folds one chunk of samples into the running minimums.
    ///
    /// The chunk is reduced to a per-day candidate first and then merged
    /// with what earlier chunks recorded. `min` is associative, so the final
    /// mapping does not depend on how the stream was split.
    pub fn update(&mut self, chunk: &[HeartRateSample]) {
        let mut candidates: HashMap<UserDay, u16> = HashMap::new();
        for sample in chunk {
            let key = sample.key();
            if !self.targets.contains(&key) {
                continue;
            }

            candidates
                .entry(key)
                .and_modify(|min| *min = (*min).min(sample.value))
                .or_insert(sample.value);
        }

        for (key, candidate) in candidates {
            self.minimums
                .entry(key)
                .and_modify(|min| *min = (*min).min(candidate))
                .or_insert(candidate);
        }
    }

    pub fn get(&self, key: &UserDay) -> Option<u16> {
        self.minimums.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.minimums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minimums.is_empty()
    }

    /// Writes the recorded minimum into each row. Rows without a reading
    /// are set to missing. Returns how many rows received a value.
    pub fn apply(&self, rows: &mut [MergedRecord]) -> usize {
        rows.iter_mut()
            .map(|row| {
                row.resting_heart_rate = self.get(&row.key()).map(f64::from);
                row.resting_heart_rate.is_some()
            })
            .filter(|found| *found)
            .count()
    }
}

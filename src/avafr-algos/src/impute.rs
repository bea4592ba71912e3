use avafr_types::MergedRecord;

/// Columns the neighbour distance is measured over, in order.
pub const IMPUTE_FEATURES: [&str; 5] = [
    "TotalMinutesAsleep",
    "VeryActiveMinutes",
    "FairlyActiveMinutes",
    "LightlyActiveMinutes",
    "SedentaryMinutes",
];

type Features = [f64; IMPUTE_FEATURES.len()];

/// Fills missing resting heart rates with the mean of the `k` nearest rows
/// that have one.
///
/// Features are min-max normalized per column before taking the Euclidean
/// distance; a constant column contributes nothing. Ties are broken by row
/// order. Only rows that had a value before imputation act as donors.
pub struct KnnImputer {
    pub k: usize,
}

impl Default for KnnImputer {
    fn default() -> Self {
        Self { k: Self::DEFAULT_K }
    }
}

impl KnnImputer {
    pub const DEFAULT_K: usize = 5;

    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Returns how many rows were filled. With fewer than `k` donors, or
    /// `k == 0`, nothing is touched.
    pub fn impute(&self, rows: &mut [MergedRecord]) -> usize {
        let donors = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| row.resting_heart_rate.map(|hr| (idx, hr)))
            .collect::<Vec<_>>();

        if self.k == 0 || donors.len() < self.k {
            if donors.len() < rows.len() {
                warn!(
                    "{} donors available, {} needed: leaving resting heart rate missing",
                    donors.len(),
                    self.k
                );
            }
            return 0;
        }

        let features = normalized_features(rows);
        let mut filled = 0;

        for idx in 0..rows.len() {
            if rows[idx].resting_heart_rate.is_some() {
                continue;
            }

            let mut neighbours = donors
                .iter()
                .map(|&(donor, hr)| (distance(&features[idx], &features[donor]), donor, hr))
                .collect::<Vec<_>>();
            neighbours.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

            let sum = neighbours.iter().take(self.k).map(|n| n.2).sum::<f64>();
            rows[idx].resting_heart_rate = Some(sum / self.k as f64);
            filled += 1;
        }

        debug!("imputed resting heart rate for {} rows", filled);
        filled
    }
}

fn raw_features(row: &MergedRecord) -> Features {
    [
        row.total_minutes_asleep,
        row.very_active_minutes,
        row.fairly_active_minutes,
        row.lightly_active_minutes,
        row.sedentary_minutes,
    ]
    .map(f64::from)
}

fn normalized_features(rows: &[MergedRecord]) -> Vec<Features> {
    let raw = rows.iter().map(raw_features).collect::<Vec<_>>();

    let mut min = [f64::INFINITY; IMPUTE_FEATURES.len()];
    let mut max = [f64::NEG_INFINITY; IMPUTE_FEATURES.len()];
    for features in &raw {
        for (col, value) in features.iter().enumerate() {
            min[col] = min[col].min(*value);
            max[col] = max[col].max(*value);
        }
    }

    raw.into_iter()
        .map(|features| {
            let mut normalized = [0.0; IMPUTE_FEATURES.len()];
            for (col, value) in features.iter().enumerate() {
                let range = max[col] - min[col];
                if range > 0.0 {
                    normalized[col] = (value - min[col]) / range;
                }
            }
            normalized
        })
        .collect()
}

fn distance(a: &Features, b: &Features) -> f64 {
    a.iter()
        .zip(b)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

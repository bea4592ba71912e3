#[macro_use]
extern crate log;

pub(crate) mod merge;
pub use merge::merge;

pub(crate) mod resting_hr;
pub use resting_hr::RestingHeartRate;

pub(crate) mod impute;
pub use impute::{IMPUTE_FEATURES, KnnImputer};

pub(crate) mod readiness;
pub use readiness::{ReadinessBounds, ReadinessScore, Recommendation, score, score_rows};

pub mod stats;

#[cfg(test)]
pub(crate) mod test_rows;

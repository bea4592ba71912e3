pub mod activity;
pub use activity::ActivityRecord;

pub mod sleep;
pub use sleep::SleepRecord;

pub mod heart_rate;
pub use heart_rate::HeartRateSample;

pub mod merged;
pub use merged::MergedRecord;

pub mod fitness_data;
pub use fitness_data::DataType;

mod user_day;
pub use user_day::UserDay;

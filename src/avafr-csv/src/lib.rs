#[macro_use]
extern crate log;

mod error;
pub use error::CsvError;

mod helpers;
pub use helpers::{normalize_header, parse_date, parse_date_time};

mod table;
pub use table::Loaded;

mod activity;
pub use activity::load_activity;

mod sleep;
pub use sleep::load_sleep;

mod heart_rate;
pub use heart_rate::{DEFAULT_CHUNK_SIZE, HeartRateReader};

mod prepared;
pub use prepared::{load_prepared, write_prepared};

#[cfg(test)]
pub(crate) mod test_files;

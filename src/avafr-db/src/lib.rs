#[macro_use]
extern crate log;

mod db;
pub use db::DatabaseHandler;

mod type_impl;
pub use type_impl::fitness_data::{FitnessRecord, SearchFitnessData};
pub use type_impl::prepared::SearchPrepared;

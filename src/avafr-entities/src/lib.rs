pub mod prelude;

pub mod fitness_data;
pub mod prepared_data;

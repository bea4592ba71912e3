pub mod fitness_data;
pub mod prepared;

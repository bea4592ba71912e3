pub use super::fitness_data::Entity as FitnessData;
pub use super::prepared_data::Entity as PreparedData;

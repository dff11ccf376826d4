pub mod envelope;
pub mod health;
pub mod query;
pub mod trimmed;

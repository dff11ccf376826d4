pub mod config;
pub mod repos;

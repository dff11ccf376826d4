pub mod api;
pub mod app;
pub mod domain;
pub mod dto;
pub mod error;
pub mod generator;
pub mod infra;
pub mod loader;
pub mod modules;
pub mod oas;
pub mod services;

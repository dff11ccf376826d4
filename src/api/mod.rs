pub mod auth;
pub mod crud;
pub mod errors;
pub mod extract;
pub mod health;

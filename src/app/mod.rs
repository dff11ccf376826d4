pub mod bootstrap;
pub mod router;

pub mod analyze;
pub mod config;
pub mod strategies;
pub mod suggest;

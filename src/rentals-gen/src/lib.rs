pub mod store;
pub mod error;
pub mod probability;
pub mod generator;
pub mod config;

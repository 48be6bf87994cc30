//! Core configuration types

pub mod config;

pub use config::{ObjectConfig, WorldConfig};

//! Configuration system for fontshelf.
//!
//! This crate provides the YAML-backed settings consumed by the `fontshelf`
//! library:
//!
//! - Shaping-handle cache capacity
//! - Lazy typeface materialization failure policy
//! - Registry defaults

pub mod config;
pub mod error;
mod types;

pub use config::{FontShelfConfig, MaterializationConfig, RegistryConfig, ShapingCacheConfig};
pub use error::ConfigError;
pub use types::FailurePolicy;

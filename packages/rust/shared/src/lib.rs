//! Shared types, error model, and configuration for eodb.
//!
//! This crate is the foundation depended on by all other eodb crates.
//! It provides:
//! - [`EodbError`], the unified error type
//! - Domain types ([`ExecutiveOrder`], [`TimelineItem`], [`FilterState`])
//! - Configuration ([`AppConfig`], [`DataSources`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DataConfig, DataSources, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{EodbError, Result};
pub use types::{ExecutiveOrder, FilterState, IMMEDIATE, TimelineItem, UNTITLED};

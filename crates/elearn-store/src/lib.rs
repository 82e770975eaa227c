//! elearn-store: File-backed persistence and configuration.
//!
//! Provides [`JsonFileStore`], the on-disk [`elearn_core::DomainStore`],
//! and the configuration loader that tells the CLI where the dataset and
//! question bank live.

pub mod config;
pub mod json_store;

pub use config::{load_config, load_config_from, AdminConfig, ElearnConfig};
pub use json_store::JsonFileStore;

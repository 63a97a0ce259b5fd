//! Shared errors and configuration for Pulse.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application-wide error type
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, RowStoreKind};
pub use error::{AppError, AppResult};

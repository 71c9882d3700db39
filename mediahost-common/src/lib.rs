//! # mediahost Common Library
//!
//! Shared code for the mediahost service:
//! - Error types
//! - Configuration file loading and compiled defaults
//! - Storage directory initialization
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod time;

pub use error::{Error, Result};

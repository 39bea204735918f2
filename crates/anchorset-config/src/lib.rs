//! Anchorset Config - Calculator configuration service
//!
//! This crate provides:
//! - The configuration snapshot model served to the calculator
//! - The bundled static defaults
//! - Row mappers with a per-category fallback policy
//! - The aggregator and the fail-safe accessor
//! - Admin mutations with input validation

pub mod mapper;
pub mod model;
pub mod service;
pub mod static_config;
pub mod validation;

// Re-export commonly used types
pub use model::*;
pub use service::{aggregate, get_config};
pub use static_config::static_config;

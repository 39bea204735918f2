//! Anchorset Server - HTTP surface of the anchor calculator configuration
//!
//! Serves the calculator configuration snapshot, the Basic-auth protected
//! admin API and stored product artwork.

pub mod api;
pub mod error;
pub mod middleware;
pub mod model;
pub mod startup;

pub use error::AppError;
pub use model::{AppState, Configuration};

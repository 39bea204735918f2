//! Configuration service layer
//!
//! - `aggregate`: authoritative snapshot built from the store
//! - `get_config`: fail-safe accessor used by read endpoints
//! - `admin`: validated single-category mutations
//! - `image`: product artwork storage and lookup

pub mod admin;
pub mod aggregate;
pub mod image;

pub use aggregate::{aggregate, get_config};

use anchorset_common::AnchorsetError;
use anchorset_persistence::CalculatorPersistence;

/// Resolve the store handle for a mutation
pub fn require_store(
    store: Option<&dyn CalculatorPersistence>,
) -> Result<&dyn CalculatorPersistence, AnchorsetError> {
    store.ok_or_else(|| {
        AnchorsetError::StoreUnavailable("no database is configured for this server".to_string())
    })
}

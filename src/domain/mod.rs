//! Domain layer containing business entities and store contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`error`] - Issuance, resolution and store error types
//!
//! The domain layer has no dependencies on the HTTP or infrastructure layers.

pub mod entities;
pub mod error;
pub mod repositories;

pub use error::{LinkError, StoreError};

//! Domain layer containing entities and repository contracts.
//!
//! The domain layer has no dependencies on the storage backend. Repository
//! traits define the contracts implemented by the infrastructure layer, and
//! business rules live in [`crate::application::services`].
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;

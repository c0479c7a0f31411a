//! Infrastructure layer: storage backends behind the domain repository traits.
//!
//! - [`persistence`] - SQLite pool and repository implementations

pub mod persistence;

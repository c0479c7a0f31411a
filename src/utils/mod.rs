//! Pure helpers used by the application services.
//!
//! - [`code_validator`] - Custom short code validation
//! - [`code_generator`] - Hash-derived and random short code generation
//! - [`url_normalizer`] - URL normalization before storage

pub mod code_generator;
pub mod code_validator;
pub mod url_normalizer;

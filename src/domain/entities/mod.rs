//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored short-code mapping
//! - [`ClickEvent`] - A recorded resolution of a short code
//!
//! Creation inputs live in separate structs ([`NewUrlRecord`],
//! [`NewClickEvent`]) so store-assigned fields never appear in them.

pub mod click;
pub mod url_record;

pub use click::{ClickContext, ClickEvent, NewClickEvent};
pub use url_record::{NewUrlRecord, UrlRecord};

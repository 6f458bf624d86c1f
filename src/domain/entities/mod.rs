//! Core domain entities.
//!
//! - [`ShortLink`] - A persisted code → target binding with an expiry
//! - [`NewShortLink`] - Input for creating a link
//! - [`ResolvedLink`] - A live row plus the store clock it was read with

pub mod short_link;

pub use short_link::{LinkCounts, NewShortLink, ResolvedLink, ShortLink};

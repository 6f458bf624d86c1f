//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`target_url`] - Target URL validation
//! - [`client_ip`] - Client identity extraction for rate limiting

pub mod client_ip;
pub mod code_generator;
pub mod target_url;

//! Business logic services for the application layer.

pub mod issuance_service;
pub mod resolution_service;

pub use issuance_service::{IssuanceService, IssueRequest, LinkPolicy};
pub use resolution_service::ResolutionService;

//! Error vocabulary shared by services, stores and the HTTP layer.

pub mod domain;
pub mod error_code;

pub use domain::DomainError;
pub use error_code::ErrorCode;

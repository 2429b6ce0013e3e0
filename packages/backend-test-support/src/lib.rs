//! Backend test support utilities
//!
//! Shared by the backend and session-bridge integration tests: logging
//! initialization, unique test data, and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

pub use unique_helpers::{unique_email, unique_str};

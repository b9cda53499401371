//! Test support utilities for the colorpass backend.
//!
//! Shared by the backend's integration tests: quiet logging initialization,
//! ProblemDetails assertions, and unique test data helpers.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

//! Shared types for the Mesa ordering platform
//!
//! Common types used across the server and future client crates:
//! domain models, the unified error system, API response structures,
//! notification payloads and ID/time utilities.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Error system re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Message bus re-exports (for convenient access)
pub use message::{BusMessage, EventType};

//! Shared types and advisory logic for the farm advisory platform
//!
//! This crate contains the domain models, the localized phrase catalog and the
//! pure soil/weather advisory engine. It is used by the backend and, through
//! WASM, by the browser for offline estimates.

pub mod advisory;
pub mod locale;
pub mod models;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use models::*;
pub use types::*;
pub use validation::*;

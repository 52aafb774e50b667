//! Domain models for the advisory platform

mod soil;
mod weather;

pub use soil::*;
pub use weather::*;

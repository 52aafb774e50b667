//! HTTP request handlers

pub mod health;
pub mod soil;
pub mod weather;

pub use health::{health_check, root};
pub use soil::{predict_soil, soil_history};
pub use weather::current_weather;

//! Business logic services for the farm advisory platform

pub mod history;
pub mod soil;
pub mod weather;

pub use history::{HistoryStore, PgHistoryStore};
pub use soil::SoilAdvisoryService;
pub use weather::{WeatherAdvisoryService, WeatherReport};

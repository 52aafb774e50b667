//! External API integrations

pub mod advisory;
pub mod weather;

pub use advisory::{AdvisoryClient, AdvisoryGenerator, AdvisoryRequest};
pub use weather::{ObservedWeather, WeatherClient, WeatherProvider};

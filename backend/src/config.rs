//! Configuration management for the farm advisory service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides: `AGRI_` prefix, `__` between nested
//!    keys (`AGRI_DATABASE__URL`, `AGRI_WEATHER__API_KEY`). `AGRI_ENVIRONMENT`
//!    selects the config file.

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// JWT secret used when none is configured
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-key";

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT verification configuration
    pub jwt: JwtConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Text-generation API used to phrase soil recommendations
    pub advisory: AdvisoryConfig,

    /// History listing limits
    pub history: HistoryConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JwtConfig {
    /// Secret key used to verify bearer tokens
    pub secret: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdvisoryConfig {
    /// OpenAI-compatible chat completions endpoint (base URL)
    pub api_endpoint: String,

    /// API key for the text-generation service
    pub api_key: String,

    /// Model used for soil recommendations
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoryConfig {
    /// Page size when the client does not ask for one
    pub default_page_size: i64,

    /// Upper bound on any requested page size
    pub max_page_size: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// `pretty` or `json`
    pub format: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .add_source(config::Config::try_from(&Config::default())?)
            .set_override("environment", environment.clone())?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_SECTION__KEY)
            .add_source(
                Environment::with_prefix("AGRI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Reject settings that would only fail later at request time
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message("database.url must be set".into()));
        }
        if !self.is_development() && self.jwt.secret == DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::Message(
                "jwt.secret must be set outside development".into(),
            ));
        }
        if self.history.default_page_size < 1
            || self.history.max_page_size < self.history.default_page_size
        {
            return Err(ConfigError::Message(
                "history page sizes must satisfy 1 <= default_page_size <= max_page_size".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/agri_advisory".to_string(),
            max_connections: 10,
            min_connections: 2,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEVELOPMENT_JWT_SECRET.to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.1,
            timeout_secs: 30,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 50,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn development() -> Config {
        Config {
            environment: "development".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_are_valid_in_development() {
        assert!(development().validate().is_ok());
    }

    #[test]
    fn test_production_requires_real_secret() {
        let config = Config {
            environment: "production".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            environment: "production".to_string(),
            jwt: JwtConfig {
                secret: "a-real-secret".to_string(),
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_page_sizes() {
        let mut config = development();
        config.history.default_page_size = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_use_single_underscore_prefix() {
        std::env::set_var("AGRI_HISTORY__MAX_PAGE_SIZE", "80");
        std::env::set_var("AGRI_WEATHER__API_KEY", "owm-from-env");

        let config = Config::load();

        std::env::remove_var("AGRI_HISTORY__MAX_PAGE_SIZE");
        std::env::remove_var("AGRI_WEATHER__API_KEY");

        let config = config.unwrap();
        assert_eq!(config.history.max_page_size, 80);
        assert_eq!(config.weather.api_key, "owm-from-env");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_rejects_empty_database_url() {
        let mut config = development();
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }
}

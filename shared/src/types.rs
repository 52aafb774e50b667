//! Common types used across the platform

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Supported languages
///
/// Requests carry a free-form language code; only `ta` selects Tamil, every
/// other value (including an absent or non-string one) falls back to English.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ta")]
    Tamil,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
        }
    }

    /// Resolve a language code sent by a client
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("ta") {
            Language::Tamil
        } else {
            Language::English
        }
    }

    /// Name used when asking a text generator to answer in this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "Tamil",
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Language::from_code).unwrap_or_default())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Paginated history request after clamping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageSize(pub i64);

impl PageSize {
    /// Clamp a requested page size to `1..=max`, using `default` when absent
    pub fn clamp(requested: Option<i64>, default: i64, max: i64) -> Self {
        let size = requested.unwrap_or(default).clamp(1, max.max(1));
        PageSize(size)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

use std::time::Duration;

use chrono::NaiveDate;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Model and request settings for the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    /// Time budget for one completion call.
    pub timeout: Duration,
    /// "Today" as seen by the model, so relative dates give stable answers.
    pub reference_date: NaiveDate,
    /// Base URL of the generative language API.
    pub endpoint: String,
}

impl ModelConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            timeout: DEFAULT_TIMEOUT,
            reference_date: default_reference_date(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// 2025-07-10, the date the demo dataset was written against.
pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 10).unwrap_or_default()
}

//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Display ===
    /// Environment name reported by `/` (e.g. "development", "staging").
    #[serde(default = "default_environment")]
    pub environment: String,

    // === Server ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable verbose/debug logging.
    #[serde(default)]
    pub debug: bool,

    // === Fault Injection ===
    /// Inject an artificial random delay into every request.
    #[serde(default = "default_true")]
    pub fault_injection: bool,

    /// Lower bound of the injected delay, in milliseconds.
    #[serde(default = "default_fault_min_ms")]
    pub fault_latency_min_ms: u64,

    /// Upper bound of the injected delay, in milliseconds.
    #[serde(default = "default_fault_max_ms")]
    pub fault_latency_max_ms: u64,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_fault_min_ms() -> u64 {
    1_000
}

fn default_fault_max_ms() -> u64 {
    3_000
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.fault_latency_min_ms > self.fault_latency_max_ms {
            return Err(format!(
                "FAULT_LATENCY_MIN_MS ({}) must not exceed FAULT_LATENCY_MAX_MS ({})",
                self.fault_latency_min_ms, self.fault_latency_max_ms
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            port: default_port(),
            debug: false,
            fault_injection: default_true(),
            fault_latency_min_ms: default_fault_min_ms(),
            fault_latency_max_ms: default_fault_max_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.environment, "development");
        assert_eq!(config.port, 5000);
        assert!(!config.debug);
        assert!(config.fault_injection);
        assert_eq!(config.fault_latency_min_ms, 1_000);
        assert_eq!(config.fault_latency_max_ms, 3_000);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_latency_range() {
        let config = Config {
            fault_latency_min_ms: 5_000,
            fault_latency_max_ms: 1_000,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}

//! Offline signature configuration with validation.
//!
//! ```toml
//! default_ttl = "5m"
//! max_ttl = "1h"
//! clock_skew = "2m"
//! nonce_len = 16
//! expected_audience = "https://app.example"
//! expected_network = "mainnet"
//!
//! [chain]
//! lookup_timeout = "10s"
//! ```

use crate::domain::envelope::{Network, DEFAULT_TTL, MAX_NONCE_LEN, MIN_NONCE_LEN};
use crate::domain::scheme::EnvelopeScheme;
use crate::domain::verifier::VerifyPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineSignatureConfig {
    /// TTL applied when a request does not carry one
    #[serde(with = "humantime_serde")]
    pub default_ttl: Duration,
    /// Largest TTL a request may ask for
    #[serde(with = "humantime_serde")]
    pub max_ttl: Duration,
    /// Tolerance after `exp` before a message counts as expired
    #[serde(with = "humantime_serde")]
    pub clock_skew: Duration,
    /// Random nonce length in bytes
    pub nonce_len: usize,
    /// Audience the verifier insists on, if any
    pub expected_audience: Option<String>,
    /// Network the verifier insists on, if any
    pub expected_network: Option<Network>,
    /// Ledger lookups
    pub chain: ChainConfig,
}

impl Default for OfflineSignatureConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            max_ttl: Duration::from_secs(60 * 60),
            clock_skew: Duration::ZERO,
            nonce_len: MIN_NONCE_LEN,
            expected_audience: None,
            expected_network: None,
            chain: ChainConfig::default(),
        }
    }
}

impl OfflineSignatureConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_ttl.is_zero() {
            return Err(ConfigError::InvalidTtl("default_ttl must be non-zero".into()));
        }
        if self.default_ttl > self.max_ttl {
            return Err(ConfigError::InvalidTtl(format!(
                "default_ttl {:?} exceeds max_ttl {:?}",
                self.default_ttl, self.max_ttl
            )));
        }
        if chrono::Duration::from_std(self.max_ttl).is_err() {
            return Err(ConfigError::InvalidTtl("max_ttl out of range".into()));
        }
        if chrono::Duration::from_std(self.clock_skew).is_err() {
            return Err(ConfigError::InvalidClockSkew("clock_skew out of range".into()));
        }
        if !(MIN_NONCE_LEN..=MAX_NONCE_LEN).contains(&self.nonce_len) {
            return Err(ConfigError::InvalidNonceLength(self.nonce_len));
        }
        if self.chain.lookup_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "chain.lookup_timeout must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Parse from a TOML string, then validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, then validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Envelope scheme parameters.
    pub fn envelope_scheme(&self) -> EnvelopeScheme {
        EnvelopeScheme {
            default_ttl: self.default_ttl,
            max_ttl: self.max_ttl,
            nonce_len: self.nonce_len,
        }
    }

    /// Verifier policy. Out-of-range skew (rejected by `validate`) falls back to zero.
    pub fn verify_policy(&self) -> VerifyPolicy {
        VerifyPolicy {
            clock_skew: chrono::Duration::from_std(self.clock_skew)
                .unwrap_or_else(|_| chrono::Duration::zero()),
            expected_audience: self.expected_audience.clone(),
            expected_network: self.expected_network,
        }
    }
}

/// Chain identity checker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Upper bound on one access-key lookup
    #[serde(with = "humantime_serde")]
    pub lookup_timeout: Duration,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {error}")]
    Io { path: String, error: String },
    /// TOML syntax or type error
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// TTL bounds inconsistent
    #[error("invalid ttl: {0}")]
    InvalidTtl(String),
    /// Nonce length outside 16..=32
    #[error("nonce_len must be between 16 and 32, got {0}")]
    InvalidNonceLength(usize),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Clock skew not representable as a signed duration
    #[error("invalid clock skew: {0}")]
    InvalidClockSkew(String),
}

/// Duration strings: `500ms`, `30s`, `5m`, `1h`, or bare seconds.
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ms = duration.as_millis();
        let formatted = if ms % 1000 != 0 {
            format!("{ms}ms")
        } else {
            format!("{}s", duration.as_secs())
        };
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, String> {
        let s = s.trim();
        let number = |digits: &str| {
            digits
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("invalid duration `{s}`"))
        };

        if let Some(ms) = s.strip_suffix("ms") {
            return number(ms).map(Duration::from_millis);
        }

        let (digits, multiplier) = if let Some(secs) = s.strip_suffix('s') {
            (secs, 1)
        } else if let Some(mins) = s.strip_suffix('m') {
            (mins, 60)
        } else if let Some(hours) = s.strip_suffix('h') {
            (hours, 3600)
        } else {
            (s, 1)
        };

        number(digits)?
            .checked_mul(multiplier)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration `{s}` overflows"))
    }
}

//! Environment-provided configuration
//!
//! Target identifiers and tuning knobs are read once at startup and are
//! immutable afterwards. Credential/region/endpoint resolution is left to
//! the AWS SDK's own default chain.

use std::env;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_CHECK_INTERVAL_MS: u64 = 1000;
const DEFAULT_API_CALL_INTERVAL_MS: u64 = 100;
const DEFAULT_METRICS_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value {value:?} for {var}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Checker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// S3 bucket holding the probe object
    pub s3_bucket: String,
    /// Key of the probe object
    pub s3_key: String,
    /// DynamoDB table with string hash key `id`
    pub dynamodb_table: String,
    /// URL of the probe queue
    pub sqs_queue_url: String,
    /// Spacing between two runs of one service's catalog
    pub check_interval: Duration,
    /// Delay between consecutive steps of a multi-step chain
    pub api_call_interval: Duration,
    /// Listen address for the metrics endpoint
    pub metrics_addr: String,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary lookup, so tests never touch the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(var))
        };
        let millis = |var: &'static str, default: u64| match lookup(var).filter(|v| !v.is_empty()) {
            None => Ok(Duration::from_millis(default)),
            Some(raw) => raw
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        };

        Ok(Self {
            s3_bucket: required("S3_BUCKET")?,
            s3_key: required("S3_KEY")?,
            dynamodb_table: required("DYNAMODB_TABLE")?,
            sqs_queue_url: required("SQS_QUEUE_URL")?,
            check_interval: millis("CHECK_INTERVAL_MS", DEFAULT_CHECK_INTERVAL_MS)?,
            api_call_interval: millis("AWS_API_CALL_INTERVAL_MS", DEFAULT_API_CALL_INTERVAL_MS)?,
            metrics_addr: lookup("METRICS_ADDR")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_METRICS_ADDR.to_string()),
        })
    }
}

//! Integration test entry point
//!
//! Run with: CHECKER_RUN_INTEGRATION_TESTS=1 cargo test --test integration
//!
//! The tests expect a checker instance to be running against localstack
//! (or real AWS), e.g. started with:
//!   AWS_ENDPOINT_URL=http://localhost:4566 S3_BUCKET=... S3_KEY=... \
//!   DYNAMODB_TABLE=... SQS_QUEUE_URL=... cargo run
//!
//! Environment variables:
//! - CHECKER_RUN_INTEGRATION_TESTS: Set to "1" to enable integration tests
//! - CHECKER_TEST_METRICS_URL: Base URL of the running checker's metrics
//!   endpoint (default: http://127.0.0.1:8080)

mod exposition;

use std::env;

/// Check if integration tests should run
pub fn should_run_integration_tests() -> bool {
    env::var("CHECKER_RUN_INTEGRATION_TESTS")
        .map(|v| v == "1")
        .unwrap_or(false)
}

/// Skip test if integration tests are not enabled
#[macro_export]
macro_rules! skip_if_not_enabled {
    () => {
        if !crate::should_run_integration_tests() {
            eprintln!("Skipping integration test (set CHECKER_RUN_INTEGRATION_TESTS=1 to run)");
            return;
        }
    };
}

/// Base URL of the checker under test
pub fn metrics_base_url() -> String {
    env::var("CHECKER_TEST_METRICS_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

/// The full (service, method) catalog the checker must expose
pub const CATALOG: &[(&str, &str)] = &[
    ("S3", "GetObject"),
    ("SQS", "ReceiveMessage"),
    ("DynamoDB", "PutItem"),
    ("DynamoDB", "UpdateItem"),
    ("DynamoDB", "GetItem"),
    ("DynamoDB", "GetItemConsistent"),
    ("DynamoDB", "Query"),
    ("DynamoDB", "QueryConsistent"),
    ("DynamoDB", "Scan"),
    ("DynamoDB", "DeleteItem"),
    ("DynamoDB", "PutGetItemConsistent"),
];

/// True if the exposition text contains a sample for the label combination
pub fn has_series(text: &str, service: &str, method: &str, status: &str) -> bool {
    text.lines().any(|l| {
        l.starts_with("aws_request_duration_seconds_count")
            && l.contains(&format!("service=\"{service}\""))
            && l.contains(&format!("method=\"{method}\""))
            && l.contains(&format!("status=\"{status}\""))
    })
}

//! Metrics exposition integration tests
//!
//! Mirrors the healthy-targets scenario: with all three services reachable,
//! every catalog method eventually shows a Success series and no Failure
//! series ever appears.

use std::time::{Duration, Instant};

use crate::{has_series, metrics_base_url, skip_if_not_enabled, CATALOG};

const SCRAPE_TIMEOUT: Duration = Duration::from_secs(30);

async fn scrape(path: &str) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
    let resp = reqwest::get(format!("{}{}", metrics_base_url(), path)).await?;
    let status = resp.status();
    let body = resp.text().await?;
    Ok((status, body))
}

#[tokio::test]
async fn healthy_targets_expose_success_series_only() {
    skip_if_not_enabled!();

    let deadline = Instant::now() + SCRAPE_TIMEOUT;
    let mut last_body = String::new();

    loop {
        if let Ok((status, body)) = scrape("/metrics").await {
            assert_eq!(status, reqwest::StatusCode::OK);
            last_body = body;
            let all_present = CATALOG
                .iter()
                .all(|(service, method)| has_series(&last_body, service, method, "Success"));
            if all_present {
                break;
            }
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for all Success series; last exposition:\n{last_body}"
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    for (service, method) in CATALOG {
        assert!(
            !has_series(&last_body, service, method, "Failure"),
            "unexpected Failure series for {service}/{method}"
        );
    }
}

#[tokio::test]
async fn exposition_format_and_buckets() {
    skip_if_not_enabled!();

    let deadline = Instant::now() + SCRAPE_TIMEOUT;
    let body = loop {
        if let Ok((_, body)) = scrape("/metrics").await {
            if body.contains("aws_request_duration_seconds_bucket") {
                break body;
            }
        }
        assert!(Instant::now() < deadline, "timed out waiting for histogram samples");
        tokio::time::sleep(Duration::from_millis(100)).await;
    };

    assert!(body.contains("# TYPE aws_request_duration_seconds histogram"));
    assert!(body.contains("le=\"0.01\""));
    assert!(body.contains("le=\"5.12\""));
}

#[tokio::test]
async fn health_endpoint_responds() {
    skip_if_not_enabled!();

    let (status, body) = scrape("/health").await.expect("checker not reachable");
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    skip_if_not_enabled!();

    let (status, _) = scrape("/nope").await.expect("checker not reachable");
    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
}

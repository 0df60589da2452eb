//! Prometheus metrics for the AWS availability checker
//!
//! Exposes metrics via HTTP endpoint for Prometheus scraping. The recorder
//! is constructed explicitly and passed by reference to the check runners
//! and the exposition server; nothing registers into a process-global
//! registry, so its lifecycle ends when the owning `Arc` is dropped.

use prometheus::{exponential_buckets, HistogramOpts, HistogramVec, Registry};
use tokio_util::sync::CancellationToken;

use crate::check::Outcome;

/// Sole writer of measurement state
///
/// One cumulative histogram keyed by (service, method, status). The label
/// set is closed: services and methods are compile-time constants from the
/// check catalogs and status is the two-valued outcome, which bounds series
/// cardinality. Recording is in-memory aggregation only and is safe to call
/// concurrently from every runner.
pub struct Recorder {
    registry: Registry,
    request_duration: HistogramVec,
}

impl Recorder {
    /// Create a recorder with its own registry
    pub fn new() -> Self {
        let registry = Registry::new();

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "aws_request_duration_seconds",
                "Time spent in requests for aws.",
            )
            .buckets(exponential_buckets(0.01, 2.0, 10).unwrap()),
            &["service", "method", "status"],
        )
        .unwrap();

        registry
            .register(Box::new(request_duration.clone()))
            .unwrap();

        Self {
            registry,
            request_duration,
        }
    }

    /// Fold one observation into the distribution
    pub fn record(&self, service: &str, method: &str, outcome: Outcome, duration_secs: f64) {
        self.request_duration
            .with_label_values(&[service, method, outcome.as_str()])
            .observe(duration_secs);
    }

    /// Get metrics as Prometheus text format
    pub fn gather(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve the metrics HTTP endpoint until the token fires
pub async fn start_metrics_server(
    addr: &str,
    recorder: std::sync::Arc<Recorder>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper::{Request, Response, StatusCode};
    use hyper_util::rt::TokioIo;
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tracing::{error, info};

    async fn handle_request(
        req: Request<hyper::body::Incoming>,
        recorder: Arc<Recorder>,
    ) -> Result<Response<Full<Bytes>>, Infallible> {
        match req.uri().path() {
            "/metrics" => {
                let body = recorder.gather();
                Ok(Response::builder()
                    .status(StatusCode::OK)
                    .header("Content-Type", "text/plain; version=0.0.4; charset=utf-8")
                    .body(Full::new(Bytes::from(body)))
                    .unwrap())
            }
            "/health" => Ok(Response::builder()
                .status(StatusCode::OK)
                .body(Full::new(Bytes::from("OK")))
                .unwrap()),
            _ => Ok(Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Full::new(Bytes::from("Not Found")))
                .unwrap()),
        }
    }

    let addr: SocketAddr = addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Metrics server listening");

    loop {
        let (stream, _) = tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => accepted?,
        };
        let io = TokioIo::new(stream);
        let recorder = recorder.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| handle_request(req, recorder.clone()));
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                error!(error = %e, "Metrics server connection error");
            }
        });
    }

    info!("Metrics server stopped");
    Ok(())
}

//! Throttled chain sequencer
//!
//! Runs the steps of one chain back-to-back with a fixed inter-step delay to
//! respect downstream throughput limits. The whole chain is scored as one
//! observation; a chain abandoned by cancellation is not scored at all.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::metrics::Recorder;

use super::chain::{CheckChain, Outcome};

/// Run one chain to completion, recording exactly one observation
///
/// Steps execute strictly in order. The first failing step aborts the rest
/// of the chain and the chain is recorded as `Failure`. The delay is only
/// inserted between steps, never after the last one: throughput limits bind
/// on successive calls, so a trailing delay would only slow shutdown.
///
/// Cancellation is polled before every step and during the inter-step sleep.
/// An abandoned chain emits nothing and `None` is returned; a chain that ran
/// to completion returns its outcome and elapsed duration.
pub async fn run_chain(
    service: &str,
    chain: &CheckChain,
    inter_step_delay: Duration,
    cancel: &CancellationToken,
    recorder: &Recorder,
) -> Option<(Outcome, Duration)> {
    let start = Instant::now();
    let mut failed = false;
    let last = chain.steps().len().saturating_sub(1);

    for (i, step) in chain.steps().iter().enumerate() {
        if cancel.is_cancelled() {
            return None;
        }

        if let Err(err) = step.execute().await {
            // Alternate format keeps the SDK's error source chain visible.
            let error = format!("{err:#}");
            warn!(
                service,
                method = chain.method(),
                step = step.name(),
                error = %error,
                "Check failed"
            );
            failed = true;
            break;
        }

        if i < last {
            tokio::select! {
                _ = cancel.cancelled() => return None,
                _ = tokio::time::sleep(inter_step_delay) => {}
            }
        }
    }

    let elapsed = start.elapsed();
    let outcome = if failed { Outcome::Failure } else { Outcome::Success };
    recorder.record(service, chain.method(), outcome, elapsed.as_secs_f64());
    Some((outcome, elapsed))
}

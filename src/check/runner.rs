//! Periodic per-service check runner
//!
//! Each monitored service gets its own runner task so a slow or failing
//! service never delays another service's schedule. The wait is inter-run
//! spacing, not a wall-clock tick: the next cycle is scheduled only after
//! the previous one completes plus the full interval.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::metrics::Recorder;

use super::chain::CheckGroup;
use super::sequencer::run_chain;

/// Drive one service's check catalog until the token fires
///
/// Chains run strictly sequentially in catalog order. A failing chain is
/// recorded and the next cycle proceeds at the normal interval; there are no
/// retries and no backoff. Cancellation interrupts the inter-cycle wait and
/// is observed between chains through the sequencer's own polling; once this
/// returns, no further observations are emitted for the service.
pub async fn run_group(
    group: CheckGroup,
    interval: Duration,
    inter_step_delay: Duration,
    cancel: CancellationToken,
    recorder: Arc<Recorder>,
) {
    info!(
        service = group.service(),
        interval_ms = interval.as_millis() as u64,
        "Check runner started"
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }

        for chain in group.chains() {
            let scored = run_chain(group.service(), chain, inter_step_delay, &cancel, &recorder).await;
            if scored.is_none() {
                // Abandoned by cancellation; the outer select will break.
                break;
            }
        }
    }

    info!(service = group.service(), "Check runner stopped");
}

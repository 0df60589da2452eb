//! Check-scheduling and result-recording engine
//!
//! One periodic runner per monitored service drives that service's static
//! chain catalog through the throttled sequencer, which times each chain and
//! folds the outcome into the shared recorder. A single cancellation token
//! fans out to every runner and is polled at every suspension point.

mod chain;
mod runner;
mod sequencer;

pub use chain::{CheckChain, CheckGroup, CheckStep, Outcome};
pub use runner::run_group;

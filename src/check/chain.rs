//! Check primitives: steps, chains, and per-service groups
//!
//! A step is a single timed operation against a target resource. A chain is
//! an ordered sequence of steps scored as one unit under one method name.
//! A group is the static catalog of chains for one monitored service.

use futures::future::BoxFuture;

/// Outcome of a completed chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Label value for the `status` metric dimension
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }
}

type StepFn = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// A named, no-argument unit of work
///
/// Holds an execute capability built from a closure capturing an immutable
/// client handle and its target identifiers. Stateless between invocations.
pub struct CheckStep {
    name: &'static str,
    exec: StepFn,
}

impl CheckStep {
    pub fn new<F, Fut>(name: &'static str, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name,
            exec: Box::new(move || Box::pin(f())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the underlying operation once
    pub async fn execute(&self) -> anyhow::Result<()> {
        (self.exec)().await
    }
}

impl std::fmt::Debug for CheckStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckStep").field("name", &self.name).finish()
    }
}

/// An ordered sequence of steps reporting one observation under one method name
///
/// Steps execute strictly in order and execution stops at the first failing
/// step. Must contain at least one step.
#[derive(Debug)]
pub struct CheckChain {
    method: &'static str,
    steps: Vec<CheckStep>,
}

impl CheckChain {
    pub fn new(method: &'static str, steps: Vec<CheckStep>) -> Self {
        debug_assert!(!steps.is_empty(), "a chain needs at least one step");
        Self { method, steps }
    }

    /// Convenience constructor for the common single-step chain
    pub fn single(method: &'static str, step: CheckStep) -> Self {
        Self::new(method, vec![step])
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn steps(&self) -> &[CheckStep] {
        &self.steps
    }
}

/// The static check catalog for one monitored service
#[derive(Debug)]
pub struct CheckGroup {
    service: &'static str,
    chains: Vec<CheckChain>,
}

impl CheckGroup {
    pub fn new(service: &'static str, chains: Vec<CheckChain>) -> Self {
        Self { service, chains }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn chains(&self) -> &[CheckChain] {
        &self.chains
    }
}

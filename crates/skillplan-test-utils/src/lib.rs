//! Shared test doubles for skillplan tests.
//!
//! [`RecordingProvider`] counts how many strategies of each kind were built
//! and how many `create_plan` calls reached them. Its strategies answer with
//! a one-step plan naming the strategy, or with a [`CannedFailure`] when the
//! provider was built with [`RecordingProvider::failing`].

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use skillplan_core::kernel::{FunctionView, Kernel};
use skillplan_core::planner::{Plan, PlanStep, PlannerProvider, PlanningStrategy};

/// Skill name used in the single step returned by recording strategies.
pub const STRATEGY_SKILL: &str = "_strategy";

/// Error returned by strategies of a failing [`RecordingProvider`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("canned failure from {strategy} strategy: {message}")]
pub struct CannedFailure {
    pub strategy: String,
    pub message: String,
}

#[derive(Debug, Default)]
struct Counters {
    sequential_built: AtomicUsize,
    action_built: AtomicUsize,
    sequential_calls: AtomicUsize,
    action_calls: AtomicUsize,
}

/// A [`PlannerProvider`] that records every construction and call.
///
/// Clones share counters, so a clone can be handed to the kernel while the
/// test keeps the original for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    counters: Arc<Counters>,
    failure: Option<String>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose strategies always fail with [`CannedFailure`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            counters: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub fn sequential_built(&self) -> usize {
        self.counters.sequential_built.load(Ordering::SeqCst)
    }

    pub fn action_built(&self) -> usize {
        self.counters.action_built.load(Ordering::SeqCst)
    }

    pub fn sequential_calls(&self) -> usize {
        self.counters.sequential_calls.load(Ordering::SeqCst)
    }

    pub fn action_calls(&self) -> usize {
        self.counters.action_calls.load(Ordering::SeqCst)
    }

    /// Total strategies built, both kinds.
    pub fn total_built(&self) -> usize {
        self.sequential_built() + self.action_built()
    }
}

impl PlannerProvider for RecordingProvider {
    fn sequential(&self, _kernel: Arc<Kernel>) -> Box<dyn PlanningStrategy> {
        self.counters.sequential_built.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingStrategy {
            name: "sequential",
            counters: Arc::clone(&self.counters),
            failure: self.failure.clone(),
        })
    }

    fn action(&self, _kernel: Arc<Kernel>) -> Box<dyn PlanningStrategy> {
        self.counters.action_built.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingStrategy {
            name: "action",
            counters: Arc::clone(&self.counters),
            failure: self.failure.clone(),
        })
    }
}

struct RecordingStrategy {
    name: &'static str,
    counters: Arc<Counters>,
    failure: Option<String>,
}

#[async_trait]
impl PlanningStrategy for RecordingStrategy {
    fn name(&self) -> &str {
        self.name
    }

    async fn create_plan(&self, goal: &str) -> Result<Plan> {
        let calls = match self.name {
            "sequential" => &self.counters.sequential_calls,
            _ => &self.counters.action_calls,
        };
        calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(CannedFailure {
                strategy: self.name.to_string(),
                message: message.clone(),
            }
            .into());
        }

        Ok(Plan::with_steps(goal, vec![PlanStep::new(STRATEGY_SKILL, self.name)]))
    }
}

/// Build a kernel with `functions` registered and `provider` as its planner
/// provider.
pub fn kernel_with(provider: &RecordingProvider, functions: Vec<FunctionView>) -> Arc<Kernel> {
    functions
        .into_iter()
        .fold(Kernel::builder(), |builder, f| builder.function(f))
        .planners(provider.clone())
        .build()
}

/// A native function fixture.
pub fn native_function() -> FunctionView {
    FunctionView::native("FileIOSkill", "ReadAsync").with_description("Read a file")
}

/// A semantic function fixture.
pub fn semantic_function() -> FunctionView {
    FunctionView::semantic("WriterSkill", "Summarize").with_description("Summarize text")
}

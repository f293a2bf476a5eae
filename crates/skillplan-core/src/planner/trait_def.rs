//! The `PlanningStrategy` and `PlannerProvider` traits.
//!
//! A strategy turns a goal into a [`Plan`]; a provider builds a fresh
//! strategy of each kind against a shared [`Kernel`]. Both traits are
//! object-safe so strategies can be returned as `Box<dyn PlanningStrategy>`
//! and providers stored as `Arc<dyn PlannerProvider>`.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::plan::Plan;
use crate::kernel::Kernel;

/// A component that translates a goal into a plan.
#[async_trait]
pub trait PlanningStrategy: Send + Sync {
    /// Short name for logging (e.g. "sequential").
    fn name(&self) -> &str;

    /// Create a plan for `goal`.
    async fn create_plan(&self, goal: &str) -> Result<Plan>;
}

/// Builds planning strategies.
///
/// The dispatcher calls one of these per planning request and drops the
/// strategy afterwards, so implementations should not rely on a strategy
/// instance outliving a single call.
pub trait PlannerProvider: Send + Sync {
    /// Build a multi-step (sequential) strategy.
    fn sequential(&self, kernel: Arc<Kernel>) -> Box<dyn PlanningStrategy>;

    /// Build a single-action strategy.
    fn action(&self, kernel: Arc<Kernel>) -> Box<dyn PlanningStrategy>;
}

const _: () = {
    fn _assert_strategy_object_safe(_: &dyn PlanningStrategy) {}
    fn _assert_provider_object_safe(_: &dyn PlannerProvider) {}
};

//! The plan dispatcher.
//!
//! [`ChatPlanner`] is a thin wrapper that decides whether a goal needs
//! planning at all and, if so, which strategy plans it. It owns no planning
//! logic of its own.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::options::{PlanType, PlannerOptions};
use super::plan::Plan;
use super::trait_def::PlanningStrategy;
use crate::kernel::Kernel;

/// Selects a planning strategy for each goal and delegates to it.
///
/// Holds only a shared kernel and the (optional) options it was built with,
/// so one instance can serve concurrent `create_plan` calls.
#[derive(Clone)]
pub struct ChatPlanner {
    kernel: Arc<Kernel>,
    options: Option<PlannerOptions>,
}

impl ChatPlanner {
    /// Create a dispatcher. `None` options behave like
    /// [`PlannerOptions::default`].
    pub fn new(kernel: Arc<Kernel>, options: Option<PlannerOptions>) -> Self {
        Self { kernel, options }
    }

    /// The kernel strategies are built against.
    pub fn kernel(&self) -> &Arc<Kernel> {
        &self.kernel
    }

    /// The options this dispatcher was created with.
    pub fn options(&self) -> Option<&PlannerOptions> {
        self.options.as_ref()
    }

    /// The strategy kind that will be used for non-trivial goals.
    pub fn plan_type(&self) -> PlanType {
        self.options.map(|o| o.plan_type).unwrap_or_default()
    }

    /// Create a plan for `goal`.
    ///
    /// 1. If no native or semantic functions are registered (imports
    ///    included), return an empty plan for `goal` without building a
    ///    strategy.
    /// 2. Otherwise build a fresh strategy for [`Self::plan_type`] and return
    ///    whatever it produces, errors included, unchanged.
    pub async fn create_plan(&self, goal: &str) -> Result<Plan> {
        let functions = self.kernel.skills().functions_view(true, true);
        if functions.is_empty() {
            debug!(goal, "no functions registered, returning empty plan");
            return Ok(Plan::new(goal));
        }

        let strategy = self.strategy();
        debug!(
            goal,
            strategy = strategy.name(),
            functions = functions.len(),
            "delegating plan creation"
        );
        strategy.create_plan(goal).await
    }

    fn strategy(&self) -> Box<dyn PlanningStrategy> {
        let planners = self.kernel.planners();
        let kernel = Arc::clone(&self.kernel);
        match self.plan_type() {
            PlanType::Sequential => planners.sequential(kernel),
            PlanType::Action => planners.action(kernel),
        }
    }
}

impl std::fmt::Debug for ChatPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatPlanner")
            .field("kernel", &self.kernel)
            .field("options", &self.options)
            .finish()
    }
}

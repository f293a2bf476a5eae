//! Planner provider that builds [`ExternalPlanner`]s from configuration.

use std::sync::Arc;

use super::command::StrategiesConfig;
use super::planner::ExternalPlanner;
use crate::kernel::Kernel;
use crate::planner::{PlanType, PlannerProvider, PlanningStrategy};

/// Builds an [`ExternalPlanner`] per request from the `[strategies]`
/// configuration. A strategy kind with no command still builds; it fails
/// when asked to plan.
#[derive(Debug, Clone, Default)]
pub struct ExternalPlannerProvider {
    strategies: StrategiesConfig,
}

impl ExternalPlannerProvider {
    pub fn new(strategies: StrategiesConfig) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &StrategiesConfig {
        &self.strategies
    }

    fn build(&self, plan_type: PlanType, kernel: Arc<Kernel>) -> Box<dyn PlanningStrategy> {
        Box::new(ExternalPlanner::new(
            plan_type,
            self.strategies.get(plan_type).cloned(),
            kernel,
        ))
    }
}

impl PlannerProvider for ExternalPlannerProvider {
    fn sequential(&self, kernel: Arc<Kernel>) -> Box<dyn PlanningStrategy> {
        self.build(PlanType::Sequential, kernel)
    }

    fn action(&self, kernel: Arc<Kernel>) -> Box<dyn PlanningStrategy> {
        self.build(PlanType::Action, kernel)
    }
}

//! The execution context shared by the dispatcher and planning strategies.
//!
//! A [`Kernel`] bundles the [`SkillCollection`] (what can be planned with)
//! and the [`PlannerProvider`] (what builds planning strategies). It is
//! immutable once built and shared as `Arc<Kernel>`.
//!
//! ```text
//! KernelBuilder --register(fn)--> SkillCollection
//!     |          --planners(p)--> Arc<dyn PlannerProvider>
//!     v
//! Arc<Kernel> --skills()----> functions_view(..)
//!             --planners()--> sequential(kernel) / action(kernel)
//! ```

pub mod functions;
pub mod skills;

use std::sync::Arc;

pub use functions::{FunctionKind, FunctionView, FunctionsView, ParameterView};
pub use skills::SkillCollection;

use crate::external::ExternalPlannerProvider;
use crate::planner::PlannerProvider;

/// Shared, read-only runtime context.
pub struct Kernel {
    skills: SkillCollection,
    planners: Arc<dyn PlannerProvider>,
}

impl Kernel {
    /// Start building a kernel.
    pub fn builder() -> KernelBuilder {
        KernelBuilder::default()
    }

    /// The registered functions.
    pub fn skills(&self) -> &SkillCollection {
        &self.skills
    }

    /// The provider used to construct planning strategies.
    pub fn planners(&self) -> &dyn PlannerProvider {
        self.planners.as_ref()
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("functions", &self.skills.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Kernel`].
///
/// Without an explicit provider the kernel uses an
/// [`ExternalPlannerProvider`] with no commands configured, so any strategy
/// it builds fails when asked to plan.
#[derive(Default)]
pub struct KernelBuilder {
    skills: SkillCollection,
    planners: Option<Arc<dyn PlannerProvider>>,
}

impl KernelBuilder {
    /// Replace the skill collection wholesale.
    pub fn skills(mut self, skills: SkillCollection) -> Self {
        self.skills = skills;
        self
    }

    /// Register a single function.
    pub fn function(mut self, function: FunctionView) -> Self {
        self.skills.register(function);
        self
    }

    /// Set the planner provider.
    pub fn planners(mut self, planners: impl PlannerProvider + 'static) -> Self {
        self.planners = Some(Arc::new(planners));
        self
    }

    pub fn build(self) -> Arc<Kernel> {
        let planners = self
            .planners
            .unwrap_or_else(|| Arc::new(ExternalPlannerProvider::default()));
        Arc::new(Kernel {
            skills: self.skills,
            planners,
        })
    }
}

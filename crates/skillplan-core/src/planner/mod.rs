//! Planning: the dispatcher, its options, the plan type, and the strategy
//! interface.
//!
//! # Architecture
//!
//! ```text
//! ChatPlanner::create_plan(goal)
//!     |
//!     +-- kernel.skills().functions_view(true, true)
//!     |       empty? --> Plan { goal, steps: [] }
//!     |
//!     +-- match plan_type
//!     |       Sequential --> kernel.planners().sequential(kernel)
//!     |       Action     --> kernel.planners().action(kernel)
//!     |
//!     v
//! Box<dyn PlanningStrategy>::create_plan(goal) --> Result<Plan>
//! ```

pub mod chat;
pub mod options;
pub mod plan;
pub mod trait_def;

pub use chat::ChatPlanner;
pub use options::{PlanType, PlanTypeParseError, PlannerOptions};
pub use plan::{Plan, PlanStep};
pub use trait_def::{PlannerProvider, PlanningStrategy};

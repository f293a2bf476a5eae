//! Planning strategies that run as external commands.
//!
//! ```text
//! ExternalPlannerProvider --sequential/action(kernel)--> ExternalPlanner
//!     |
//!     v
//! spawn `command args..`
//!     stdin  <-- PlanRequest { strategy, goal, functions } (JSON)
//!     stdout --> Plan { goal, steps } (JSON)
//! ```

pub mod command;
pub mod planner;
pub mod provider;

pub use command::{CommandSpec, StrategiesConfig};
pub use planner::{ExternalPlanner, ExternalPlannerError, PlanRequest};
pub use provider::ExternalPlannerProvider;

//! Goal-to-plan dispatch over a registry of native and semantic functions.
//!
//! The [`planner::ChatPlanner`] inspects the functions registered on a
//! [`kernel::Kernel`] and hands the goal to one of two planning strategies
//! (sequential or single-action). Strategies are built per call by the
//! kernel's [`planner::PlannerProvider`]; the [`external`] module ships a
//! provider that delegates to out-of-process planner commands.

pub mod external;
pub mod kernel;
pub mod manifest;
pub mod planner;

pub use kernel::{FunctionKind, FunctionView, FunctionsView, Kernel, ParameterView, SkillCollection};
pub use planner::{ChatPlanner, Plan, PlanStep, PlanType, PlannerOptions, PlannerProvider, PlanningStrategy};

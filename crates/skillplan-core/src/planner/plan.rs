//! The plan produced for a goal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered sequence of function invocations intended to achieve a goal.
///
/// A plan with no steps is valid: it is what the dispatcher returns when
/// there is nothing to plan with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// The goal the plan was created for.
    pub goal: String,
    /// Steps in execution order.
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

/// One function invocation within a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub skill_name: String,
    pub function_name: String,
    /// Arguments bound to the function's parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    /// Variable the step's result is stored under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Plan {
    /// A plan for `goal` with no steps.
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_steps(goal: impl Into<String>, steps: Vec<PlanStep>) -> Self {
        Self {
            goal: goal.into(),
            steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl PlanStep {
    pub fn new(skill_name: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            skill_name: skill_name.into(),
            function_name: function_name.into(),
            parameters: BTreeMap::new(),
            output: None,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.skill_name, self.function_name)
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.qualified_name())?;
        for (i, (name, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value:?}")?;
        }
        f.write_str(")")?;
        if let Some(output) = &self.output {
            write!(f, " -> ${output}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Goal: {}", self.goal)?;
        if self.steps.is_empty() {
            return writeln!(f, "  (no steps)");
        }
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {}. {step}", i + 1)?;
        }
        Ok(())
    }
}

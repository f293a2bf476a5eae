//! Command definitions for out-of-process planners.

use serde::{Deserialize, Serialize};

use crate::planner::PlanType;

/// How to launch one planner command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program to execute (looked up on `$PATH` if not absolute).
    pub command: String,
    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,
    /// Wall-clock limit for one planning call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CommandSpec {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// `command arg1 arg2`, for error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

fn default_timeout_secs() -> u64 {
    CommandSpec::DEFAULT_TIMEOUT_SECS
}

/// Planner commands, one per strategy kind (`[strategies]` config section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategiesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequential: Option<CommandSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CommandSpec>,
}

impl StrategiesConfig {
    /// The command configured for `plan_type`, if any.
    pub fn get(&self, plan_type: PlanType) -> Option<&CommandSpec> {
        match plan_type {
            PlanType::Sequential => self.sequential.as_ref(),
            PlanType::Action => self.action.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_command() {
        let spec: CommandSpec = toml::from_str("command = \"planner\"").unwrap();
        assert_eq!(spec.command, "planner");
        assert!(spec.args.is_empty());
        assert_eq!(spec.timeout_secs, 120);
    }

    #[test]
    fn deserialize_strategies_section() {
        let cfg: StrategiesConfig = toml::from_str(
            r#"
[sequential]
command = "seq-planner"
args = ["--json", "--verbose"]
timeout_secs = 30
"#,
        )
        .unwrap();
        let seq = cfg.get(PlanType::Sequential).unwrap();
        assert_eq!(seq.args, vec!["--json", "--verbose"]);
        assert_eq!(seq.timeout_secs, 30);
        assert!(cfg.get(PlanType::Action).is_none());
    }

    #[test]
    fn display_joins_args() {
        let spec = CommandSpec::new("planner").with_args(["a", "b"]);
        assert_eq!(spec.display(), "planner a b");
        assert_eq!(CommandSpec::new("planner").display(), "planner");
    }
}

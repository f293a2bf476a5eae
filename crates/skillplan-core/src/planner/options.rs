//! Planner configuration: which strategy the dispatcher should use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The planning strategy to use.
///
/// This is a closed set; adding a variant forces every `match` on it to be
/// revisited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PlanType {
    /// Multi-step plan: an ordered sequence of function calls.
    Sequential,
    /// Single-action plan: at most one function call.
    #[default]
    Action,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a planner type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid planner type {0:?} (expected sequential or action)")]
pub struct PlanTypeParseError(pub String);

impl FromStr for PlanType {
    type Err = PlanTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("sequential") {
            Ok(Self::Sequential)
        } else if trimmed.eq_ignore_ascii_case("action") {
            Ok(Self::Action)
        } else {
            Err(PlanTypeParseError(s.to_string()))
        }
    }
}

impl TryFrom<String> for PlanType {
    type Error = PlanTypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Options for the planner, read from the `[planner]` config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerOptions {
    /// Strategy selection. Defaults to [`PlanType::Action`] when unset.
    #[serde(rename = "type", default)]
    pub plan_type: PlanType,
}

impl PlannerOptions {
    pub fn new(plan_type: PlanType) -> Self {
        Self { plan_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        planner: Option<PlannerOptions>,
    }

    #[test]
    fn default_is_action() {
        assert_eq!(PlanType::default(), PlanType::Action);
        assert_eq!(PlannerOptions::default().plan_type, PlanType::Action);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("sequential".parse::<PlanType>().unwrap(), PlanType::Sequential);
        assert_eq!("Sequential".parse::<PlanType>().unwrap(), PlanType::Sequential);
        assert_eq!("ACTION".parse::<PlanType>().unwrap(), PlanType::Action);
        assert_eq!(" action ".parse::<PlanType>().unwrap(), PlanType::Action);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "stepwise".parse::<PlanType>().unwrap_err();
        assert_eq!(err, PlanTypeParseError("stepwise".to_string()));
        assert!(err.to_string().contains("expected sequential or action"));
    }

    #[test]
    fn deserialize_section_with_type() {
        let w: Wrapper = toml::from_str("[planner]\ntype = \"Sequential\"\n").unwrap();
        assert_eq!(w.planner.unwrap().plan_type, PlanType::Sequential);
    }

    #[test]
    fn deserialize_section_without_type_defaults_to_action() {
        let w: Wrapper = toml::from_str("[planner]\n").unwrap();
        assert_eq!(w.planner.unwrap().plan_type, PlanType::Action);
    }

    #[test]
    fn deserialize_missing_section_is_none() {
        let w: Wrapper = toml::from_str("").unwrap();
        assert!(w.planner.is_none());
    }

    #[test]
    fn deserialize_rejects_unknown_type() {
        let result: Result<Wrapper, _> = toml::from_str("[planner]\ntype = \"parallel\"\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid planner type"), "unexpected error: {err}");
    }

    #[test]
    fn serializes_lowercase() {
        let out = toml::to_string(&PlannerOptions::new(PlanType::Sequential)).unwrap();
        assert_eq!(out.trim(), "type = \"sequential\"");
    }
}

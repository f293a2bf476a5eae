//! Function descriptors exposed by the skill registry.
//!
//! These are read-only views: they describe a callable function (its skill,
//! name, parameters and whether it is native or model-driven) without
//! carrying the function body.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a function is host code or a model-invoked prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    /// Host-native callable code.
    Native,
    /// Model-driven ("semantic") function.
    Semantic,
}

impl FunctionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter accepted by a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterView {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ParameterView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

/// Description of one registered function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionView {
    /// Function name, unique within its skill.
    pub name: String,
    /// Name of the skill the function belongs to.
    pub skill_name: String,
    /// Human-readable description, used by planners to pick functions.
    #[serde(default)]
    pub description: String,
    /// Native or semantic.
    pub kind: FunctionKind,
    /// Declared parameters, in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterView>,
}

impl FunctionView {
    pub fn new(skill_name: impl Into<String>, name: impl Into<String>, kind: FunctionKind) -> Self {
        Self {
            name: name.into(),
            skill_name: skill_name.into(),
            description: String::new(),
            kind,
            parameters: Vec::new(),
        }
    }

    /// Shorthand for a native function view.
    pub fn native(skill_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(skill_name, name, FunctionKind::Native)
    }

    /// Shorthand for a semantic function view.
    pub fn semantic(skill_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(skill_name, name, FunctionKind::Semantic)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterView) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// `Skill.Function`, the form planners use to reference a function.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.skill_name, self.name)
    }
}

/// Snapshot of registered functions, split into native and semantic
/// partitions and grouped by skill name.
///
/// A skill key is only present when at least one function sits under it, so
/// an empty partition map means the partition holds no functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionsView {
    pub native_functions: BTreeMap<String, Vec<FunctionView>>,
    pub semantic_functions: BTreeMap<String, Vec<FunctionView>>,
}

impl FunctionsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function to the partition matching its kind.
    ///
    /// Skill names group case-insensitively: a function joins the group of
    /// the first spelling of its skill already present in either partition.
    pub fn add_function(&mut self, function: FunctionView) -> &mut Self {
        let key = self.skill_key(&function.skill_name);
        let partition = match function.kind {
            FunctionKind::Native => &mut self.native_functions,
            FunctionKind::Semantic => &mut self.semantic_functions,
        };
        partition.entry(key).or_default().push(function);
        self
    }

    fn skill_key(&self, skill_name: &str) -> String {
        let lowered = skill_name.to_lowercase();
        self.native_functions
            .keys()
            .chain(self.semantic_functions.keys())
            .find(|existing| existing.to_lowercase() == lowered)
            .cloned()
            .unwrap_or_else(|| skill_name.to_string())
    }

    /// `true` when both partitions are empty.
    pub fn is_empty(&self) -> bool {
        self.native_functions.is_empty() && self.semantic_functions.is_empty()
    }

    /// Total number of functions across both partitions.
    pub fn len(&self) -> usize {
        self.native_functions.values().map(Vec::len).sum::<usize>()
            + self.semantic_functions.values().map(Vec::len).sum::<usize>()
    }

    /// Iterate over every function, native partition first.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionView> {
        self.native_functions
            .values()
            .chain(self.semantic_functions.values())
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_reports_empty() {
        let view = FunctionsView::new();
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert_eq!(view.iter().count(), 0);
    }

    #[test]
    fn add_function_routes_by_kind() {
        let mut view = FunctionsView::new();
        view.add_function(FunctionView::native("FileIO", "Read"))
            .add_function(FunctionView::semantic("Writer", "Summarize"))
            .add_function(FunctionView::semantic("Writer", "Translate"));

        assert!(!view.is_empty());
        assert_eq!(view.len(), 3);
        assert_eq!(view.native_functions["FileIO"].len(), 1);
        assert_eq!(view.semantic_functions["Writer"].len(), 2);
    }

    #[test]
    fn add_function_groups_skill_case_insensitively() {
        let mut view = FunctionsView::new();
        view.add_function(FunctionView::native("Writer", "A"))
            .add_function(FunctionView::native("writer", "B"))
            .add_function(FunctionView::semantic("WRITER", "Summarize"));

        assert_eq!(view.native_functions.len(), 1);
        assert_eq!(view.native_functions["Writer"].len(), 2);
        assert_eq!(view.native_functions["Writer"][1].skill_name, "writer");
        assert_eq!(view.semantic_functions["Writer"].len(), 1);
    }

    #[test]
    fn semantic_only_view_is_not_empty() {
        let mut view = FunctionsView::new();
        view.add_function(FunctionView::semantic("Writer", "Summarize"));
        assert!(view.native_functions.is_empty());
        assert!(!view.is_empty());
    }

    #[test]
    fn iter_lists_native_before_semantic() {
        let mut view = FunctionsView::new();
        view.add_function(FunctionView::semantic("Alpha", "Think"))
            .add_function(FunctionView::native("Zulu", "Run"));

        let names: Vec<String> = view.iter().map(FunctionView::qualified_name).collect();
        assert_eq!(names, vec!["Zulu.Run", "Alpha.Think"]);
    }

    #[test]
    fn function_view_serializes_kind_lowercase() {
        let f = FunctionView::native("Math", "Add")
            .with_description("Add two numbers")
            .with_parameter(ParameterView::new("a"))
            .with_parameter(ParameterView::new("b").with_default("0"));
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["kind"], "native");
        assert_eq!(json["parameters"][1]["default_value"], "0");
        assert!(json["parameters"][0].get("default_value").is_none());
    }
}

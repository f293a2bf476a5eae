//! Skill collection -- the registry of functions available to planners.
//!
//! Functions are keyed by `(skill, name)`, compared case-insensitively. A
//! collection can import other collections, whose functions then appear in
//! its [`FunctionsView`] as if they were registered directly.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::functions::{FunctionKind, FunctionView, FunctionsView};

/// Registry of native and semantic functions, grouped by skill.
///
/// # Example
///
/// ```ignore
/// let mut skills = SkillCollection::new();
/// skills.register(FunctionView::semantic("Writer", "Summarize"));
/// let view = skills.functions_view(true, true);
/// assert!(!view.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SkillCollection {
    /// lowercase skill name -> lowercase function name -> view
    skills: BTreeMap<String, BTreeMap<String, FunctionView>>,
    imported: Vec<Arc<SkillCollection>>,
}

impl SkillCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function.
    ///
    /// If a function with the same skill and name is already registered, it
    /// is replaced and the old one is returned.
    pub fn register(&mut self, function: FunctionView) -> Option<FunctionView> {
        self.skills
            .entry(function.skill_name.to_lowercase())
            .or_default()
            .insert(function.name.to_lowercase(), function)
    }

    /// Import another collection. Its functions (and those it imports in
    /// turn) are included in lookups and views, after this collection's own.
    pub fn import(&mut self, other: Arc<SkillCollection>) {
        self.imported.push(other);
    }

    /// Look up a function by skill and name, searching imports in order.
    pub fn get(&self, skill_name: &str, function_name: &str) -> Option<&FunctionView> {
        let own = self
            .skills
            .get(&skill_name.to_lowercase())
            .and_then(|functions| functions.get(&function_name.to_lowercase()));
        own.or_else(|| {
            self.imported
                .iter()
                .find_map(|collection| collection.get(skill_name, function_name))
        })
    }

    /// Return `true` if the function is registered here or in an import.
    pub fn contains(&self, skill_name: &str, function_name: &str) -> bool {
        self.get(skill_name, function_name).is_some()
    }

    /// Number of distinct functions, imports included.
    pub fn len(&self) -> usize {
        self.functions_view(true, true).len()
    }

    /// Return `true` if no functions are registered here or in any import.
    pub fn is_empty(&self) -> bool {
        self.skills.values().all(BTreeMap::is_empty)
            && self.imported.iter().all(|collection| collection.is_empty())
    }

    /// Build a view of the registered functions.
    ///
    /// Only partitions whose flag is set are populated. Functions registered
    /// directly shadow imported ones with the same skill and name.
    pub fn functions_view(&self, include_semantic: bool, include_native: bool) -> FunctionsView {
        let mut view = FunctionsView::new();
        let mut seen = HashSet::new();
        self.collect_into(&mut view, &mut seen, include_semantic, include_native);
        view
    }

    fn collect_into(
        &self,
        view: &mut FunctionsView,
        seen: &mut HashSet<(String, String)>,
        include_semantic: bool,
        include_native: bool,
    ) {
        for (skill_key, functions) in &self.skills {
            for (function_key, function) in functions {
                // Record the key even when the partition is filtered out, so
                // an own function hides imports of either kind.
                if !seen.insert((skill_key.clone(), function_key.clone())) {
                    continue;
                }
                let wanted = match function.kind {
                    FunctionKind::Native => include_native,
                    FunctionKind::Semantic => include_semantic,
                };
                if wanted {
                    view.add_function(function.clone());
                }
            }
        }
        for collection in &self.imported {
            collection.collect_into(view, seen, include_semantic, include_native);
        }
    }
}

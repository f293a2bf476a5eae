//! Function manifest: a TOML file declaring the functions to register.
//!
//! ```toml
//! [[functions]]
//! skill = "WriterSkill"
//! name = "Summarize"
//! kind = "semantic"
//! description = "Summarize text"
//!
//! [[functions.parameters]]
//! name = "input"
//! description = "Text to summarize"
//! default = ""
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kernel::{FunctionKind, FunctionView, ParameterView, SkillCollection};

/// Top-level structure of a manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub functions: Vec<ManifestFunction>,
}

/// A single `[[functions]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFunction {
    pub skill: String,
    pub name: String,
    pub kind: FunctionKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ManifestParameter>,
}

/// A `[[functions.parameters]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestParameter {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Errors from loading or validating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest at {path:?}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("function #{index} has an empty {field}")]
    EmptyName { index: usize, field: &'static str },

    #[error("duplicate function {0:?}")]
    DuplicateFunction(String),

    #[error("function {function:?} declares parameter {parameter:?} more than once")]
    DuplicateParameter { function: String, parameter: String },
}

impl From<ManifestFunction> for FunctionView {
    fn from(f: ManifestFunction) -> Self {
        let view = FunctionView::new(f.skill, f.name, f.kind).with_description(f.description);
        f.parameters.into_iter().fold(view, |view, p| {
            let mut param = ParameterView::new(p.name).with_description(p.description);
            param.default_value = p.default;
            view.with_parameter(param)
        })
    }
}

/// Parse and validate manifest TOML into a [`SkillCollection`].
pub fn parse_manifest(content: &str) -> Result<SkillCollection, ManifestError> {
    let manifest: ManifestFile = toml::from_str(content)?;
    validate(&manifest)?;

    let mut skills = SkillCollection::new();
    for function in manifest.functions {
        skills.register(function.into());
    }
    Ok(skills)
}

/// Read a manifest file from disk and parse it.
pub fn load_manifest(path: &Path) -> Result<SkillCollection, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_manifest(&content)
}

fn validate(manifest: &ManifestFile) -> Result<(), ManifestError> {
    let mut seen = HashSet::new();
    for (index, function) in manifest.functions.iter().enumerate() {
        if function.skill.trim().is_empty() {
            return Err(ManifestError::EmptyName {
                index,
                field: "skill",
            });
        }
        if function.name.trim().is_empty() {
            return Err(ManifestError::EmptyName {
                index,
                field: "name",
            });
        }

        let qualified = format!("{}.{}", function.skill, function.name);
        if !seen.insert((function.skill.to_lowercase(), function.name.to_lowercase())) {
            return Err(ManifestError::DuplicateFunction(qualified));
        }

        let mut params = HashSet::new();
        for p in &function.parameters {
            if !params.insert(p.name.to_lowercase()) {
                return Err(ManifestError::DuplicateParameter {
                    function: qualified,
                    parameter: p.name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[functions]]
skill = "WriterSkill"
name = "Summarize"
kind = "semantic"
description = "Summarize text"

[[functions.parameters]]
name = "input"
description = "Text to summarize"

[[functions.parameters]]
name = "length"
default = "short"

[[functions]]
skill = "FileIO"
name = "Read"
kind = "native"
"#;

    #[test]
    fn parse_sample_manifest() {
        let skills = parse_manifest(SAMPLE).unwrap();
        assert_eq!(skills.len(), 2);

        let summarize = skills.get("writerskill", "summarize").unwrap();
        assert_eq!(summarize.kind, FunctionKind::Semantic);
        assert_eq!(summarize.description, "Summarize text");
        assert_eq!(summarize.parameters.len(), 2);
        assert_eq!(summarize.parameters[1].default_value.as_deref(), Some("short"));
        assert!(summarize.parameters[0].default_value.is_none());

        let view = skills.functions_view(true, true);
        assert_eq!(view.native_functions["FileIO"].len(), 1);
    }

    #[test]
    fn empty_manifest_gives_empty_collection() {
        let skills = parse_manifest("").unwrap();
        assert!(skills.is_empty());
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = parse_manifest(
            r#"
[[functions]]
skill = "S"
name = "F"
kind = "magic"
"#,
        );
        assert!(matches!(result, Err(ManifestError::Toml(_))));
    }

    #[test]
    fn rejects_empty_skill_name() {
        let result = parse_manifest(
            r#"
[[functions]]
skill = " "
name = "F"
kind = "native"
"#,
        );
        assert!(matches!(
            result,
            Err(ManifestError::EmptyName { index: 0, field: "skill" })
        ));
    }

    #[test]
    fn rejects_duplicate_functions_case_insensitive() {
        let result = parse_manifest(
            r#"
[[functions]]
skill = "Math"
name = "Add"
kind = "native"

[[functions]]
skill = "math"
name = "add"
kind = "semantic"
"#,
        );
        match result {
            Err(ManifestError::DuplicateFunction(name)) => assert_eq!(name, "math.add"),
            other => panic!("expected DuplicateFunction, got {other:?}"),
        }
    }

    #[test]
    fn dotted_names_are_not_duplicates() {
        let skills = parse_manifest(
            r#"
[[functions]]
skill = "a.b"
name = "c"
kind = "native"

[[functions]]
skill = "a"
name = "b.c"
kind = "native"
"#,
        )
        .unwrap();
        assert!(skills.contains("a.b", "c"));
        assert!(skills.contains("a", "b.c"));
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn rejects_duplicate_parameters() {
        let result = parse_manifest(
            r#"
[[functions]]
skill = "Math"
name = "Add"
kind = "native"

[[functions.parameters]]
name = "a"

[[functions.parameters]]
name = "A"
"#,
        );
        assert!(matches!(
            result,
            Err(ManifestError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = load_manifest(Path::new("/nonexistent/functions.toml"));
        assert!(matches!(result, Err(ManifestError::Read { .. })));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("functions.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let skills = load_manifest(&path).unwrap();
        assert!(skills.contains("FileIO", "Read"));
    }
}

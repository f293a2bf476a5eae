//! `skillplan plan` and `skillplan functions`.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use skillplan_core::external::ExternalPlannerProvider;
use skillplan_core::kernel::{FunctionView, FunctionsView, Kernel, SkillCollection};
use skillplan_core::manifest;
use skillplan_core::planner::{ChatPlanner, Plan};

use crate::config::SkillplanConfig;

/// Load the configured manifest, or an empty collection if none is set.
fn load_skills(manifest_path: Option<&Path>) -> Result<SkillCollection> {
    match manifest_path {
        Some(path) => manifest::load_manifest(path)
            .with_context(|| format!("failed to load function manifest {}", path.display())),
        None => {
            tracing::debug!("no function manifest configured; registry is empty");
            Ok(SkillCollection::new())
        }
    }
}

/// Build the kernel the CLI plans against.
pub fn build_kernel(config: &SkillplanConfig) -> Result<Arc<Kernel>> {
    let skills = load_skills(config.manifest.as_deref())?;
    Ok(Kernel::builder()
        .skills(skills)
        .planners(ExternalPlannerProvider::new(config.strategies.clone()))
        .build())
}

/// Execute `skillplan plan`.
pub async fn run_plan(config: &SkillplanConfig, goal: &str, json: bool) -> Result<()> {
    let kernel = build_kernel(config)?;
    let planner = ChatPlanner::new(kernel, config.planner);
    tracing::info!(planner = %planner.plan_type(), "creating plan");

    let plan = planner.create_plan(goal).await?;
    print!("{}", render_plan(&plan, json)?);
    Ok(())
}

/// Execute `skillplan functions`.
pub fn run_functions(config: &SkillplanConfig) -> Result<()> {
    let skills = load_skills(config.manifest.as_deref())?;
    print!("{}", render_functions(&skills.functions_view(true, true)));
    Ok(())
}

fn render_plan(plan: &Plan, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(plan).context("failed to serialize plan")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(plan.to_string())
    }
}

fn render_functions(view: &FunctionsView) -> String {
    if view.is_empty() {
        return "No functions registered.\n".to_string();
    }

    let mut out = String::new();
    for (title, partition) in [
        ("Native functions", &view.native_functions),
        ("Semantic functions", &view.semantic_functions),
    ] {
        if partition.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{title}:");
        for (skill, functions) in partition {
            let _ = writeln!(out, "  {skill}");
            for function in functions {
                let _ = writeln!(out, "    {}", describe(function));
            }
        }
    }
    out
}

fn describe(function: &FunctionView) -> String {
    let params: Vec<&str> = function.parameters.iter().map(|p| p.name.as_str()).collect();
    let mut line = format!("{}({})", function.name, params.join(", "));
    if !function.description.is_empty() {
        line.push_str(" -- ");
        line.push_str(&function.description);
    }
    line
}

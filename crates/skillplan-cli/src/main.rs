mod config;
mod plan_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use skillplan_core::external::StrategiesConfig;
use skillplan_core::planner::{PlanType, PlannerOptions};

use config::SkillplanConfig;

#[derive(Parser)]
#[command(name = "skillplan", about = "Create plans for goals from registered functions")]
struct Cli {
    /// Config file path (defaults to ~/.config/skillplan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// List the functions registered by the manifest
    Functions {
        /// Function manifest (overrides SKILLPLAN_MANIFEST env var)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Create a plan for a goal
    Plan {
        /// The goal to plan for
        goal: String,
        /// Function manifest (overrides SKILLPLAN_MANIFEST env var)
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Planner type: sequential or action (overrides SKILLPLAN_PLANNER_TYPE env var)
        #[arg(long = "type")]
        plan_type: Option<PlanType>,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the `skillplan init` command: write config file.
fn cmd_init(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        manifest: None,
        planner: Some(PlannerOptions::default()),
        strategies: StrategiesConfig::default(),
    };
    config::save_config(&path, &cfg)?;

    println!("Config written to {}", path.display());
    println!("  planner.type = {}", PlannerOptions::default().plan_type);
    println!();
    println!("Next: add [strategies.sequential] and [strategies.action] commands,");
    println!("and set `manifest` to your function manifest.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::config_path);
            cmd_init(path, force)?;
        }
        Commands::Functions { manifest } => {
            let resolved =
                SkillplanConfig::resolve(cli.config.as_deref(), None, manifest.as_deref())?;
            plan_cmd::run_functions(&resolved)?;
        }
        Commands::Plan {
            goal,
            manifest,
            plan_type,
            json,
        } => {
            let resolved =
                SkillplanConfig::resolve(cli.config.as_deref(), plan_type, manifest.as_deref())?;
            plan_cmd::run_plan(&resolved, &goal, json).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_plan_with_type() {
        let cli = Cli::try_parse_from(["skillplan", "plan", "Summarize", "--type", "Sequential"])
            .unwrap();
        match cli.command {
            Commands::Plan {
                goal, plan_type, json, ..
            } => {
                assert_eq!(goal, "Summarize");
                assert_eq!(plan_type, Some(PlanType::Sequential));
                assert!(!json);
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn cli_rejects_unknown_type() {
        let result = Cli::try_parse_from(["skillplan", "plan", "g", "--type", "parallel"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_accepts_global_config_flag() {
        let cli =
            Cli::try_parse_from(["skillplan", "functions", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        cmd_init(path.clone(), false).unwrap();
        let loaded = config::load_config(&path).unwrap();
        assert_eq!(loaded.planner, Some(PlannerOptions::new(PlanType::Action)));

        let err = cmd_init(path.clone(), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        cmd_init(path, true).unwrap();
    }
}

//! Out-of-process planning strategy.
//!
//! Spawns the configured planner command, writes a [`PlanRequest`] as JSON
//! to its stdin, and parses a [`Plan`] from its stdout. The command owns all
//! planning logic; this side only moves bytes and checks that the plan it
//! got back is for the right goal and references registered functions.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

use super::command::CommandSpec;
use crate::kernel::{FunctionView, FunctionsView, Kernel, SkillCollection};
use crate::planner::{Plan, PlanType, PlanningStrategy};

/// JSON document written to the planner command's stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Which kind of plan is wanted.
    pub strategy: PlanType,
    /// The goal to plan for.
    pub goal: String,
    /// Every registered function, native first.
    pub functions: Vec<FunctionView>,
}

impl PlanRequest {
    pub fn new(strategy: PlanType, goal: &str, functions: &FunctionsView) -> Self {
        Self {
            strategy,
            goal: goal.to_string(),
            functions: functions.iter().cloned().collect(),
        }
    }
}

/// Failures of an external planner call.
#[derive(Debug, Error)]
pub enum ExternalPlannerError {
    #[error("no {0} planner command configured")]
    NotConfigured(PlanType),

    #[error("failed to start {plan_type} planner `{command}`")]
    Spawn {
        plan_type: PlanType,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait on {plan_type} planner `{command}`")]
    Wait {
        plan_type: PlanType,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{plan_type} planner `{command}` timed out after {timeout_secs}s")]
    Timeout {
        plan_type: PlanType,
        command: String,
        timeout_secs: u64,
    },

    #[error("{plan_type} planner `{command}` failed ({status}): {stderr}")]
    Failed {
        plan_type: PlanType,
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{plan_type} planner wrote non-UTF-8 output")]
    InvalidUtf8 {
        plan_type: PlanType,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("{plan_type} planner returned malformed plan JSON")]
    MalformedOutput {
        plan_type: PlanType,
        #[source]
        source: serde_json::Error,
    },

    #[error("{plan_type} planner returned a plan for goal {actual:?}, expected {expected:?}")]
    GoalMismatch {
        plan_type: PlanType,
        expected: String,
        actual: String,
    },

    #[error("action planner returned {0} steps (expected at most one)")]
    TooManySteps(usize),

    #[error("{plan_type} planner referenced unregistered function {function:?}")]
    UnknownFunction { plan_type: PlanType, function: String },
}

/// A [`PlanningStrategy`] backed by an external command.
pub struct ExternalPlanner {
    plan_type: PlanType,
    command: Option<CommandSpec>,
    kernel: Arc<Kernel>,
}

impl ExternalPlanner {
    /// Create a planner for `plan_type`. With `command = None` every call
    /// fails with [`ExternalPlannerError::NotConfigured`].
    pub fn new(plan_type: PlanType, command: Option<CommandSpec>, kernel: Arc<Kernel>) -> Self {
        Self {
            plan_type,
            command,
            kernel,
        }
    }
}

impl std::fmt::Debug for ExternalPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalPlanner")
            .field("plan_type", &self.plan_type)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PlanningStrategy for ExternalPlanner {
    fn name(&self) -> &str {
        self.plan_type.as_str()
    }

    async fn create_plan(&self, goal: &str) -> Result<Plan> {
        let spec = self
            .command
            .as_ref()
            .ok_or(ExternalPlannerError::NotConfigured(self.plan_type))?;

        let functions = self.kernel.skills().functions_view(true, true);
        let request = PlanRequest::new(self.plan_type, goal, &functions);
        let payload = serde_json::to_vec(&request).context("failed to serialize plan request")?;

        let stdout = run_planner_command(self.plan_type, spec, payload).await?;
        let stdout = decode_stdout(self.plan_type, stdout)?;
        let plan = parse_plan_output(self.plan_type, goal, &stdout, self.kernel.skills())?;

        debug!(
            strategy = self.plan_type.as_str(),
            steps = plan.steps.len(),
            "external planner produced plan"
        );
        Ok(plan)
    }
}

/// Run the planner command with `payload` on stdin and return its raw stdout.
async fn run_planner_command(
    plan_type: PlanType,
    spec: &CommandSpec,
    payload: Vec<u8>,
) -> Result<Vec<u8>, ExternalPlannerError> {
    let mut child = Command::new(&spec.command)
        .args(&spec.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExternalPlannerError::Spawn {
            plan_type,
            command: spec.display(),
            source,
        })?;

    // Write stdin while draining stdout/stderr. Dropping the pipe sends EOF.
    let stdin_pipe = child.stdin.take();
    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let write_stdin = async move {
        if let Some(mut pipe) = stdin_pipe {
            if let Err(e) = pipe.write_all(&payload).await {
                debug!(error = %e, "planner command closed stdin before reading the request");
            }
        }
    };

    let read_stdout = async {
        let mut buf = Vec::new();
        if let Some(ref mut pipe) = stdout_pipe {
            if let Err(e) = pipe.read_to_end(&mut buf).await {
                debug!(error = %e, "failed to read planner command stdout");
            }
        }
        buf
    };

    // Stderr is only used in error messages, so lossy decoding is enough.
    let read_stderr = async {
        let mut buf = Vec::new();
        if let Some(ref mut pipe) = stderr_pipe {
            if let Err(e) = pipe.read_to_end(&mut buf).await {
                debug!(error = %e, "failed to read planner command stderr");
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    };

    let timeout = Duration::from_secs(spec.timeout_secs.max(1));
    let outcome = tokio::time::timeout(timeout, async {
        let ((), status, stdout, stderr) =
            tokio::join!(write_stdin, child.wait(), read_stdout, read_stderr);
        (status, stdout, stderr)
    })
    .await;

    match outcome {
        Ok((Ok(status), stdout, _)) if status.success() => Ok(stdout),
        Ok((Ok(status), _, stderr)) => {
            let status = match status.code() {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            };
            warn!(
                strategy = plan_type.as_str(),
                command = %spec.display(),
                %status,
                "planner command failed"
            );
            Err(ExternalPlannerError::Failed {
                plan_type,
                command: spec.display(),
                status,
                stderr: stderr.trim().to_string(),
            })
        }
        Ok((Err(source), _, _)) => Err(ExternalPlannerError::Wait {
            plan_type,
            command: spec.display(),
            source,
        }),
        Err(_) => {
            let _ = child.kill().await;
            warn!(
                strategy = plan_type.as_str(),
                command = %spec.display(),
                timeout_secs = spec.timeout_secs,
                "planner command timed out"
            );
            Err(ExternalPlannerError::Timeout {
                plan_type,
                command: spec.display(),
                timeout_secs: spec.timeout_secs,
            })
        }
    }
}

fn decode_stdout(plan_type: PlanType, stdout: Vec<u8>) -> Result<String, ExternalPlannerError> {
    String::from_utf8(stdout).map_err(|source| ExternalPlannerError::InvalidUtf8 { plan_type, source })
}

/// Parse and check a planner command's stdout.
fn parse_plan_output(
    plan_type: PlanType,
    goal: &str,
    stdout: &str,
    skills: &SkillCollection,
) -> Result<Plan, ExternalPlannerError> {
    let plan: Plan = serde_json::from_str(stdout.trim())
        .map_err(|source| ExternalPlannerError::MalformedOutput { plan_type, source })?;

    if plan.goal != goal {
        return Err(ExternalPlannerError::GoalMismatch {
            plan_type,
            expected: goal.to_string(),
            actual: plan.goal,
        });
    }

    if plan_type == PlanType::Action && plan.steps.len() > 1 {
        return Err(ExternalPlannerError::TooManySteps(plan.steps.len()));
    }

    if let Some(step) = plan
        .steps
        .iter()
        .find(|step| !skills.contains(&step.skill_name, &step.function_name))
    {
        return Err(ExternalPlannerError::UnknownFunction {
            plan_type,
            function: step.qualified_name(),
        });
    }

    Ok(plan)
}

//! Pre/post task hook registry and dispatcher.
//!
//! Event naming convention: `pre.<task>` / `post.<task>`.
//! Handlers run in declared order; a failing handler aborts the
//! remaining handlers of that phase. Shell handlers block the process
//! with inherited stdio, which is fine for a one-shot tool.

use crate::config::AppConfig;
use crate::context::OrchestrationContext;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pre,
    Post,
}

impl Phase {
    /// Phase-qualified event key, e.g. `pre.deploy`.
    pub fn key(&self, task: &str) -> String {
        match self {
            Phase::Pre => format!("pre.{}", task),
            Phase::Post => format!("post.{}", task),
        }
    }
}

/// A hook callable registered in code.
pub type HookFn = Box<dyn Fn(&OrchestrationContext) -> Result<()>>;

/// One registered hook handler.
///
/// `Shell` commands come from the config file's `hooks` section;
/// `Func` handlers are registered by task providers in code.
pub enum HookHandler {
    Shell(String),
    Func(HookFn),
}

impl fmt::Debug for HookHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookHandler::Shell(cmd) => write!(f, "Shell({:?})", cmd),
            HookHandler::Func(_) => write!(f, "Func(..)"),
        }
    }
}

/// Ordered hook handlers keyed by phase-qualified event name.
#[derive(Debug, Default)]
pub struct HookRegistry {
    handlers: BTreeMap<String, Vec<HookHandler>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded from the config file's `hooks` section.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut registry = Self::new();
        for (event, spec) in &config.hooks {
            for command in spec.commands() {
                registry.register(event.clone(), HookHandler::Shell(command));
            }
        }
        registry
    }

    /// Append a handler to an event's list, preserving declaration order.
    pub fn register(&mut self, event: impl Into<String>, handler: HookHandler) {
        self.handlers.entry(event.into()).or_default().push(handler);
    }

    /// Handlers for an event; an absent key is an empty list.
    pub fn handlers(&self, event: &str) -> &[HookHandler] {
        self.handlers.get(event).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Result of running one hook phase.
#[derive(Debug, Clone)]
pub struct PhaseRunResult {
    pub event: String,
    pub ran: usize,
}

/// Run all handlers for one phase of a task, sequentially, in declared
/// order. Each handler completes before the next starts; the first
/// failure aborts the remainder of the phase.
pub fn run_phase(
    registry: &HookRegistry,
    phase: Phase,
    task: &str,
    ctx: &OrchestrationContext,
) -> Result<PhaseRunResult> {
    let event = phase.key(task);
    let handlers = registry.handlers(&event);
    let mut ran = 0;

    for handler in handlers {
        match handler {
            HookHandler::Shell(command) => {
                log_status!("hooks", "{}> {}", event, command);
                run_shell_hook(&event, command, ctx)?;
            }
            HookHandler::Func(callable) => {
                callable(ctx)?;
            }
        }
        ran += 1;
    }

    Ok(PhaseRunResult { event, ran })
}

/// Run a shell hook command blocking, with the invocation's own stdio
/// and the orchestration base path as working directory.
fn run_shell_hook(event: &str, command: &str, ctx: &OrchestrationContext) -> Result<()> {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    };

    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    };

    let status = cmd
        .current_dir(ctx.base_path())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("run hook '{}'", event))))?;

    if !status.success() {
        return Err(Error::hook_command_failed(
            event,
            command,
            status.code().unwrap_or(-1),
        ));
    }

    Ok(())
}

use clap::Args;
use serde::Serialize;
use serde_json::json;

use dockhand::hooks::HookRegistry;
use dockhand::tasks::{self, TaskRegistry, TaskRun};

use super::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Task name to run
    pub task: Option<String>,

    /// Arguments passed through to the task body
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Serialize)]
pub struct RunOutput {
    pub command: String,
    #[serde(flatten)]
    pub run: TaskRun,
}

pub fn run(args: RunArgs, global: &super::GlobalArgs) -> CmdResult<RunOutput> {
    let ctx = super::build_context(global, args.args.clone())?;
    let registry = builtin_tasks();

    // The config (and with it the hook section) is only touched for a
    // runnable task name; rejected names must run zero hooks.
    let hook_registry = match args.task.as_deref() {
        Some(name) if registry.contains(name) => HookRegistry::from_config(ctx.config()?),
        _ => HookRegistry::new(),
    };

    let run = tasks::run_task(args.task.as_deref(), &registry, &hook_registry, &ctx)?;

    Ok((
        RunOutput {
            command: "task.run".to_string(),
            run,
        },
        0,
    ))
}

/// Tasks shipped with the binary. Deployment-specific bodies live in
/// external task providers; `status` only reads the context.
pub fn builtin_tasks() -> TaskRegistry {
    let mut registry = TaskRegistry::new();

    registry.register(
        "status",
        Box::new(|ctx| {
            let config = ctx.config()?;
            let mut modules = serde_json::Map::new();

            for module_name in config.module_names() {
                let scoped = ctx.scoped(vec![module_name.clone()]);
                let sessions: Vec<serde_json::Value> = scoped
                    .sessions()?
                    .iter()
                    .map(|d| {
                        json!({
                            "name": d.name,
                            "host": d.host,
                            "port": d.port,
                            "auth": d.auth.method(),
                        })
                    })
                    .collect();
                modules.insert(module_name, serde_json::Value::Array(sessions));
            }

            Ok(json!({
                "servers": ctx.sessions()?.len(),
                "modules": modules,
            }))
        }),
    );

    registry
}

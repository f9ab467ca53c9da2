use clap::Args;
use serde::Serialize;

use super::CmdResult;

#[derive(Args)]
pub struct TasksArgs {}

#[derive(Serialize)]
pub struct TasksOutput {
    pub command: String,
    pub tasks: Vec<String>,
}

pub fn run(_args: TasksArgs, _global: &super::GlobalArgs) -> CmdResult<TasksOutput> {
    let registry = super::run::builtin_tasks();

    Ok((
        TasksOutput {
            command: "task.list".to_string(),
            tasks: registry.names(),
        },
        0,
    ))
}

use clap::Args;
use serde::Serialize;

use dockhand::{config, validate};

use super::CmdResult;

#[derive(Args)]
pub struct ValidateArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutput {
    pub command: String,
    pub path: String,
    pub servers: usize,
    pub modules: Vec<String>,
    pub warnings: Vec<String>,
}

/// Advisory config check: warnings are reported in the payload and
/// never fail the command.
pub fn run(_args: ValidateArgs, global: &super::GlobalArgs) -> CmdResult<ValidateOutput> {
    let ctx = super::build_context(global, vec![])?;
    let path = config::resolve_path(ctx.base_path(), global.config.as_deref());

    let loaded = config::load(&path)?;
    let warnings = validate::validate(&loaded);

    Ok((
        ValidateOutput {
            command: "config.validate".to_string(),
            path: path.to_string_lossy().to_string(),
            servers: loaded.servers.len(),
            modules: loaded.module_names(),
            warnings,
        },
        0,
    ))
}

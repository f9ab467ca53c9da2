use dockhand::OrchestrationContext;

pub mod init;
pub mod run;
pub mod sessions;
pub mod tasks;
pub mod validate;

pub type CmdResult<T> = dockhand::Result<(T, i32)>;

/// Flags shared by every subcommand.
pub struct GlobalArgs {
    pub config: Option<String>,
    pub settings: Option<String>,
    pub verbose: bool,
}

/// Build the per-invocation context from the working directory and the
/// global flag overrides.
pub fn build_context(global: &GlobalArgs, args: Vec<String>) -> dockhand::Result<OrchestrationContext> {
    let base_path = std::env::current_dir()
        .map_err(|e| dockhand::Error::internal_io(e.to_string(), Some("resolve cwd".to_string())))?;

    Ok(OrchestrationContext::new(base_path)
        .with_args(args)
        .with_verbose(global.verbose)
        .with_config_path(global.config.as_deref())
        .with_settings_path(global.settings.as_deref()))
}

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{init, run, sessions, tasks, validate, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "dockhand")]
#[command(version = VERSION)]
#[command(about = "Deployment orchestration: resolved sessions, scoped modules, hook-wrapped tasks")]
struct Cli {
    /// Config file path (default <cwd>/dockhand.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Settings file path (default <cwd>/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<String>,

    /// Verbose status output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a named task through its pre/post hook pipeline
    Run(run::RunArgs),
    /// List resolved sessions, optionally scoped to modules (credentials redacted)
    Sessions(sessions::SessionsArgs),
    /// List registered tasks
    Tasks(tasks::TasksArgs),
    /// Check the config file and report advisory warnings
    Validate(validate::ValidateArgs),
    /// Scaffold starter config and settings files
    Init(init::InitArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        config: cli.config,
        settings: cli.settings,
        verbose: cli.verbose,
    };

    let (json_result, exit_code) = match cli.command {
        Commands::Run(args) => output::map_cmd_result_to_json(run::run(args, &global)),
        Commands::Sessions(args) => output::map_cmd_result_to_json(sessions::run(args, &global)),
        Commands::Tasks(args) => output::map_cmd_result_to_json(tasks::run(args, &global)),
        Commands::Validate(args) => output::map_cmd_result_to_json(validate::run(args, &global)),
        Commands::Init(args) => output::map_cmd_result_to_json(init::run(args, &global)),
    };

    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

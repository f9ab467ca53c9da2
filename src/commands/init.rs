use clap::Args;
use serde::Serialize;

use dockhand::config::DEFAULT_CONFIG_FILE;
use dockhand::settings::DEFAULT_SETTINGS_FILE;
use dockhand::Error;

use super::CmdResult;

const STARTER_CONFIG: &str = r#"{
  "servers": {
    "one": {
      "host": "1.2.3.4",
      "username": "root",
      "pem": "~/.ssh/id_rsa"
    }
  },
  "app": {
    "servers": ["one"],
    "path": "../app"
  },
  "hooks": {
    "pre.deploy": "echo starting deploy",
    "post.deploy": ["echo deploy finished"]
  }
}
"#;

const STARTER_SETTINGS: &str = r#"{
  "env": "production"
}
"#;

#[derive(Args)]
pub struct InitArgs {}

#[derive(Serialize)]
pub struct InitOutput {
    pub command: String,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Scaffold a starter config and settings file in the current directory.
/// Existing files are never overwritten.
pub fn run(_args: InitArgs, global: &super::GlobalArgs) -> CmdResult<InitOutput> {
    let ctx = super::build_context(global, vec![])?;

    let mut created = Vec::new();
    let mut skipped = Vec::new();

    for (file, content) in [
        (DEFAULT_CONFIG_FILE, STARTER_CONFIG),
        (DEFAULT_SETTINGS_FILE, STARTER_SETTINGS),
    ] {
        let path = ctx.base_path().join(file);
        if path.exists() {
            skipped.push(file.to_string());
            continue;
        }
        std::fs::write(&path, content)
            .map_err(|e| Error::internal_io(e.to_string(), Some(format!("write {}", file))))?;
        created.push(file.to_string());
    }

    Ok((
        InitOutput {
            command: "init.scaffold".to_string(),
            created,
            skipped,
        },
        0,
    ))
}

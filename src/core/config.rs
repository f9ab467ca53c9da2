//! Configuration file loading.
//!
//! The config file (default `<base>/dockhand.json`) declares the server
//! inventory, optional lifecycle hooks, and one section per deployment
//! module. Missing file and unreadable/unparsable file are distinct
//! failures: the former carries the `dockhand init` hint, the latter the
//! raw error.

use crate::error::{Error, Result};
use crate::server::ServerConfig;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "dockhand.json";

/// A named deployment concern and the servers it runs on.
///
/// Everything beyond `servers` is module-specific and opaque to the core;
/// task bodies read it through `settings`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    #[serde(default)]
    pub servers: Vec<String>,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

/// A hook declaration: a single command or an ordered list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HookSpec {
    One(String),
    Many(Vec<String>),
}

impl HookSpec {
    pub fn commands(&self) -> Vec<String> {
        match self {
            HookSpec::One(cmd) => vec![cmd.clone()],
            HookSpec::Many(cmds) => cmds.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub servers: BTreeMap<String, ServerConfig>,
    #[serde(default)]
    pub hooks: BTreeMap<String, HookSpec>,
    #[serde(flatten)]
    pub modules: BTreeMap<String, ModuleConfig>,
}

impl AppConfig {
    pub fn module(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.get(name)
    }

    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }
}

/// Resolve the effective config path: explicit override or `<base>/dockhand.json`.
pub fn resolve_path(base_path: &Path, override_path: Option<&str>) -> PathBuf {
    match override_path {
        Some(p) => PathBuf::from(shellexpand::tilde(p).to_string()),
        None => base_path.join(DEFAULT_CONFIG_FILE),
    }
}

/// Load and shape the config file, injecting server names after parse.
pub fn load(path: &Path) -> Result<AppConfig> {
    let display = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(Error::config_not_found(&display));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::config_load(&display, e))?;

    let mut config: AppConfig =
        serde_json::from_str(&content).map_err(|e| Error::config_load(&display, e))?;

    for (name, server) in config.servers.iter_mut() {
        server.name = name.clone();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_is_config_not_found_with_hint() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigNotFound);
        assert!(err.hints.iter().any(|h| h.contains("init")));
    }

    #[test]
    fn malformed_json_is_config_load_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ servers: nope }");
        let err = load(&path).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigLoadError);
    }

    #[test]
    fn server_names_are_injected_from_map_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"servers": {"web1": {"host": "1.1.1.1", "username": "root", "password": "x"}}}"#,
        );
        let config = load(&path).unwrap();
        assert_eq!(config.servers["web1"].name, "web1");
    }

    #[test]
    fn module_sections_capture_servers_and_opaque_settings() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "servers": {"one": {"host": "h", "username": "u", "password": "p"}},
                "app": {"servers": ["one"], "image": "nginx:latest"},
                "db": {"servers": ["one", "two"]}
            }"#,
        );
        let config = load(&path).unwrap();
        assert_eq!(config.module_names(), vec!["app", "db"]);
        let app = config.module("app").unwrap();
        assert_eq!(app.servers, vec!["one"]);
        assert_eq!(app.settings["image"], "nginx:latest");
        assert!(config.module("missing").is_none());
    }

    #[test]
    fn hook_section_accepts_string_or_list() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "servers": {},
                "hooks": {
                    "pre.deploy": "npm run build",
                    "post.deploy": ["echo one", "echo two"]
                }
            }"#,
        );
        let config = load(&path).unwrap();
        assert_eq!(
            config.hooks["pre.deploy"].commands(),
            vec!["npm run build".to_string()]
        );
        assert_eq!(config.hooks["post.deploy"].commands().len(), 2);
    }
}

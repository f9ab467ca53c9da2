//! Per-invocation orchestration context.
//!
//! One `OrchestrationContext` is built per command invocation and passed
//! by reference to hooks and task bodies. Config, settings, and the
//! session registry are loaded lazily and memoized in per-field cells:
//! no globals, no re-loading, no invalidation. `ScopedContext` is the
//! capability-narrowing view handed to module-scoped work: it borrows
//! the base context (and therefore its caches) and overrides only
//! session access.

use crate::config::{self, AppConfig};
use crate::credentials::SessionDescriptor;
use crate::error::Result;
use crate::sessions::SessionRegistry;
use crate::settings;
use crate::validate;
use serde_json::Value;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// Environment variable naming the ssh-agent socket.
pub const AGENT_SOCKET_ENV: &str = "SSH_AUTH_SOCK";

pub struct OrchestrationContext {
    base_path: PathBuf,
    args: Vec<String>,
    verbose: bool,
    config_path: PathBuf,
    settings_path: PathBuf,
    agent_socket: Option<String>,
    config: OnceCell<AppConfig>,
    settings: OnceCell<Value>,
    sessions: OnceCell<SessionRegistry>,
}

impl OrchestrationContext {
    /// Context rooted at `base_path` with default config/settings paths
    /// and the agent socket taken from the process environment.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        Self {
            config_path: config::resolve_path(&base_path, None),
            settings_path: settings::resolve_path(&base_path, None),
            agent_socket: std::env::var(AGENT_SOCKET_ENV).ok(),
            base_path,
            args: Vec::new(),
            verbose: false,
            config: OnceCell::new(),
            settings: OnceCell::new(),
            sessions: OnceCell::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_config_path(mut self, path: Option<&str>) -> Self {
        self.config_path = config::resolve_path(&self.base_path, path);
        self
    }

    pub fn with_settings_path(mut self, path: Option<&str>) -> Self {
        self.settings_path = settings::resolve_path(&self.base_path, path);
        self
    }

    pub fn with_agent_socket(mut self, socket: Option<String>) -> Self {
        self.agent_socket = socket;
        self
    }

    // ========================================================================
    // Exposed operations (consumed by tasks and hooks)
    // ========================================================================

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// The parsed config, loaded and advisory-validated on first access.
    pub fn config(&self) -> Result<&AppConfig> {
        if let Some(loaded) = self.config.get() {
            return Ok(loaded);
        }

        let loaded = config::load(&self.config_path)?;
        for warning in validate::validate(&loaded) {
            eprintln!("[config] warning: {}", warning);
        }
        Ok(self.config.get_or_init(|| loaded))
    }

    /// The parsed settings document, loaded on first access.
    pub fn settings(&self) -> Result<&Value> {
        if let Some(loaded) = self.settings.get() {
            return Ok(loaded);
        }

        let loaded = settings::load(&self.settings_path)?;
        Ok(self.settings.get_or_init(|| loaded))
    }

    /// The session registry, built at most once per invocation.
    pub fn sessions(&self) -> Result<&SessionRegistry> {
        if let Some(built) = self.sessions.get() {
            return Ok(built);
        }

        let config = self.config()?;
        let registry = SessionRegistry::build(config, self.agent_socket.as_deref())?;
        if self.verbose {
            log_status!("sessions", "Resolved credentials for {} servers", registry.len());
        }
        Ok(self.sessions.get_or_init(|| registry))
    }

    /// Sessions for the servers declared by the named modules, in
    /// registry enumeration order.
    pub fn sessions_for(&self, module_names: &[String]) -> Result<Vec<&SessionDescriptor>> {
        let config = self.config()?;
        let registry = self.sessions()?;
        Ok(registry.select(config, module_names))
    }

    /// A view of this context narrowed to the named modules.
    pub fn scoped(&self, module_names: Vec<String>) -> ScopedContext<'_> {
        ScopedContext {
            base: self,
            modules: module_names,
        }
    }
}

/// Module-scoped view of the orchestration context.
///
/// Holds a reference to the shared base plus its own module list;
/// everything except session access delegates to the base, so the view
/// observes the very same cached config and settings values.
pub struct ScopedContext<'a> {
    base: &'a OrchestrationContext,
    modules: Vec<String>,
}

impl<'a> ScopedContext<'a> {
    pub fn base_path(&self) -> &Path {
        self.base.base_path()
    }

    pub fn args(&self) -> &[String] {
        self.base.args()
    }

    pub fn verbose(&self) -> bool {
        self.base.verbose()
    }

    pub fn config(&self) -> Result<&AppConfig> {
        self.base.config()
    }

    pub fn settings(&self) -> Result<&Value> {
        self.base.settings()
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Session access, narrowed to this view's modules.
    pub fn sessions(&self) -> Result<Vec<&SessionDescriptor>> {
        self.base.sessions_for(&self.modules)
    }

    /// Further narrowing: only modules already inside this view's scope
    /// are honored.
    pub fn sessions_for(&self, module_names: &[String]) -> Result<Vec<&SessionDescriptor>> {
        let in_scope: Vec<String> = module_names
            .iter()
            .filter(|name| self.modules.contains(*name))
            .cloned()
            .collect();
        self.base.sessions_for(&in_scope)
    }
}

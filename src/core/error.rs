//! Structured error type shared by the library and the CLI layer.
//!
//! Every failure carries a stable `ErrorCode`, a human-readable message,
//! a JSON details payload, and optional hints. Nothing in the library
//! terminates the process; the binary's output layer maps codes to exit
//! codes and decides when a failure is fatal for the invocation.

use serde::Serialize;
use serde_json::{json, Value};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigNotFound,
    ConfigLoadError,
    SettingsNotFound,
    SettingsParseError,
    CredentialMissing,
    CredentialFileUnreadable,
    EmptyTaskName,
    UnknownTaskName,
    HookCommandFailed,
    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigNotFound => "CONFIG_NOT_FOUND",
            ErrorCode::ConfigLoadError => "CONFIG_LOAD_ERROR",
            ErrorCode::SettingsNotFound => "SETTINGS_NOT_FOUND",
            ErrorCode::SettingsParseError => "SETTINGS_PARSE_ERROR",
            ErrorCode::CredentialMissing => "CREDENTIAL_MISSING",
            ErrorCode::CredentialFileUnreadable => "CREDENTIAL_FILE_UNREADABLE",
            ErrorCode::EmptyTaskName => "EMPTY_TASK_NAME",
            ErrorCode::UnknownTaskName => "UNKNOWN_TASK_NAME",
            ErrorCode::HookCommandFailed => "HOOK_COMMAND_FAILED",
            ErrorCode::InternalIoError => "INTERNAL_IO_ERROR",
            ErrorCode::InternalJsonError => "INTERNAL_JSON_ERROR",
            ErrorCode::InternalUnexpected => "INTERNAL_UNEXPECTED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<String>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
            hints: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    // ========================================================================
    // Constructors - one per failure category
    // ========================================================================

    pub fn config_not_found(path: &str) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Config file not found: {}", path),
        )
        .with_details(json!({ "path": path }))
        .with_hint("Run 'dockhand init' to scaffold a starting configuration")
    }

    pub fn config_load(path: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConfigLoadError,
            format!("Failed to load config {}: {}", path, cause),
        )
        .with_details(json!({ "path": path }))
    }

    pub fn settings_not_found(path: &str) -> Self {
        Self::new(
            ErrorCode::SettingsNotFound,
            format!("Settings file not found: {}", path),
        )
        .with_details(json!({ "path": path }))
    }

    pub fn settings_parse(path: &str, cause: &serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SettingsParseError,
            format!("Settings file {} is not valid JSON: {}", path, cause),
        )
        .with_details(json!({
            "path": path,
            "line": cause.line(),
            "column": cause.column(),
        }))
    }

    pub fn credential_missing(server: &str) -> Self {
        Self::new(
            ErrorCode::CredentialMissing,
            format!(
                "Server '{}' has no usable authentication: set pem or password, or expose an ssh-agent socket",
                server
            ),
        )
        .with_details(json!({ "server": server }))
    }

    pub fn credential_file_unreadable(server: &str, path: &str, cause: &std::io::Error) -> Self {
        let reason = if cause.kind() == std::io::ErrorKind::NotFound {
            "file does not exist".to_string()
        } else {
            cause.to_string()
        };
        Self::new(
            ErrorCode::CredentialFileUnreadable,
            format!(
                "Cannot read private key for server '{}' at {}: {}",
                server, path, reason
            ),
        )
        .with_details(json!({ "server": server, "path": path }))
    }

    pub fn empty_task_name() -> Self {
        Self::new(ErrorCode::EmptyTaskName, "No task name provided")
            .with_hint("Run 'dockhand tasks' to list registered tasks")
    }

    pub fn unknown_task(name: &str, suggestions: Vec<String>) -> Self {
        let mut err = Self::new(
            ErrorCode::UnknownTaskName,
            format!("Unknown task '{}'", name),
        )
        .with_details(json!({ "task": name }));
        for suggestion in suggestions {
            err = err.with_hint(format!("Did you mean '{}'?", suggestion));
        }
        err
    }

    pub fn hook_command_failed(event: &str, command: &str, exit_code: i32) -> Self {
        Self::new(
            ErrorCode::HookCommandFailed,
            format!(
                "Hook '{}' command failed (exit {}): {}",
                event, exit_code, command
            ),
        )
        .with_details(json!({
            "event": event,
            "command": command,
            "exitCode": exit_code,
        }))
    }

    pub fn internal_io(message: impl Into<String>, context: Option<String>) -> Self {
        let message = message.into();
        let full = match &context {
            Some(ctx) => format!("{} ({})", message, ctx),
            None => message,
        };
        Self::new(ErrorCode::InternalIoError, full)
    }

    pub fn internal_json(message: impl Into<String>, context: Option<String>) -> Self {
        let message = message.into();
        let full = match &context {
            Some(ctx) => format!("{} ({})", message, ctx),
            None => message,
        };
        Self::new(ErrorCode::InternalJsonError, full)
    }

    pub fn internal_unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalUnexpected, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Error {}

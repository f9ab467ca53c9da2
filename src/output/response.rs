//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping. Only this
//! layer turns error codes into process exit decisions; the library
//! below it never terminates the invocation.

use dockhand::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_success<T: Serialize>(data: T) -> Result<()> {
    print_response(&CliResponse::success(data))
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::EmptyTaskName => 2,

        ErrorCode::UnknownTaskName => 4,

        ErrorCode::ConfigNotFound
        | ErrorCode::ConfigLoadError
        | ErrorCode::SettingsNotFound
        | ErrorCode::SettingsParseError => 3,

        ErrorCode::CredentialMissing | ErrorCode::CredentialFileUnreadable => 10,

        ErrorCode::HookCommandFailed => 20,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_success(data),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_task_name_codes_map_to_cli_validation_codes() {
        assert_eq!(exit_code_for_error(ErrorCode::EmptyTaskName), 2);
        assert_eq!(exit_code_for_error(ErrorCode::UnknownTaskName), 4);
    }

    #[test]
    fn fatal_categories_have_distinct_exit_codes() {
        assert_eq!(exit_code_for_error(ErrorCode::ConfigNotFound), 3);
        assert_eq!(exit_code_for_error(ErrorCode::SettingsParseError), 3);
        assert_eq!(exit_code_for_error(ErrorCode::CredentialMissing), 10);
        assert_eq!(exit_code_for_error(ErrorCode::HookCommandFailed), 20);
    }

    #[test]
    fn error_envelope_carries_code_and_hints() {
        let err = Error::config_not_found("/tmp/dockhand.json");
        let response = CliResponse::from_error(&err);
        assert!(!response.success);
        let cli_err = response.error.unwrap();
        assert_eq!(cli_err.code, "CONFIG_NOT_FOUND");
        assert!(cli_err.hints.is_some());
    }
}

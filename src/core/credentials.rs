//! Per-server credential resolution.
//!
//! Resolution order is a policy, not a default: an explicit private-key
//! file wins over an explicit password, which wins over a usable
//! ssh-agent socket (socket value present AND the file exists). Nothing
//! resolving is a hard failure naming the server.

use crate::error::{Error, Result};
use crate::server::ServerConfig;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Resolved authentication material for one server.
///
/// Key contents and passwords live only in process memory; the Debug
/// impl redacts them so no diagnostic path can leak secrets.
#[derive(Clone, PartialEq, Eq)]
pub enum SessionAuth {
    Pem { contents: String },
    Password(String),
    Agent { socket: PathBuf },
}

impl SessionAuth {
    /// Short label for user-facing output. Never includes material.
    pub fn method(&self) -> &'static str {
        match self {
            SessionAuth::Pem { .. } => "pem",
            SessionAuth::Password(_) => "password",
            SessionAuth::Agent { .. } => "ssh-agent",
        }
    }
}

impl fmt::Debug for SessionAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionAuth::Pem { .. } => write!(f, "Pem {{ contents: <redacted> }}"),
            SessionAuth::Password(_) => write!(f, "Password(<redacted>)"),
            SessionAuth::Agent { socket } => write!(f, "Agent {{ socket: {:?} }}", socket),
        }
    }
}

/// Immutable record of how to authenticate and connect to one server.
///
/// Created once by `resolve`, owned by the session registry, read-only
/// thereafter. Transport and auth options pass through unvalidated for
/// the external transport layer.
#[derive(Debug, Clone)]
pub struct SessionDescriptor {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth: SessionAuth,
    pub transport_options: Option<Value>,
    pub auth_options: Option<Value>,
}

/// Resolve one server entry into a session descriptor.
///
/// `agent_socket` is the value of the ssh-agent socket environment
/// variable, passed in by the caller so resolution stays deterministic
/// under test.
pub fn resolve(server: &ServerConfig, agent_socket: Option<&str>) -> Result<SessionDescriptor> {
    let auth = resolve_auth(server, agent_socket)?;

    Ok(SessionDescriptor {
        name: server.name.clone(),
        host: server.host.clone(),
        port: server.port,
        username: server.username.clone(),
        auth,
        transport_options: server.transport_options.clone(),
        auth_options: server.auth_options.clone(),
    })
}

fn resolve_auth(server: &ServerConfig, agent_socket: Option<&str>) -> Result<SessionAuth> {
    if let Some(pem_path) = server.pem.as_deref().filter(|p| !p.is_empty()) {
        let expanded = shellexpand::tilde(pem_path).to_string();
        let contents = std::fs::read_to_string(&expanded)
            .map_err(|e| Error::credential_file_unreadable(&server.name, &expanded, &e))?;
        return Ok(SessionAuth::Pem { contents });
    }

    if let Some(password) = server.password.as_deref().filter(|p| !p.is_empty()) {
        return Ok(SessionAuth::Password(password.to_string()));
    }

    if let Some(socket) = agent_socket.filter(|s| !s.is_empty()) {
        let socket_path = PathBuf::from(socket);
        if socket_path.exists() {
            return Ok(SessionAuth::Agent {
                socket: socket_path,
            });
        }
    }

    Err(Error::credential_missing(&server.name))
}

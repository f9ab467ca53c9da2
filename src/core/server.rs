use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One server entry from the `servers` map in the config file.
///
/// The entry name is the map key; `config::load` injects it after parse.
/// `transport_options` and `auth_options` are opaque to the core and are
/// handed to the session descriptor unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(skip_deserializing, default)]
    pub name: String,
    pub host: String,
    pub username: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub pem: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_options: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_options: Option<Value>,
}

fn default_port() -> u16 {
    22
}

impl ServerConfig {
    pub fn is_valid(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty()
    }
}

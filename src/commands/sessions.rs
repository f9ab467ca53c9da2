use clap::Args;
use serde::Serialize;

use dockhand::SessionDescriptor;

use super::CmdResult;

#[derive(Args)]
pub struct SessionsArgs {
    /// Restrict to the servers declared by these modules
    pub modules: Vec<String>,
}

/// One resolved session, with credential material redacted.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutputEntry {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth_method: String,
}

impl SessionOutputEntry {
    fn from_descriptor(descriptor: &SessionDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            host: descriptor.host.clone(),
            port: descriptor.port,
            username: descriptor.username.clone(),
            auth_method: descriptor.auth.method().to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsOutput {
    pub command: String,
    pub modules: Vec<String>,
    pub sessions: Vec<SessionOutputEntry>,
}

pub fn run(args: SessionsArgs, global: &super::GlobalArgs) -> CmdResult<SessionsOutput> {
    let ctx = super::build_context(global, vec![])?;

    let sessions: Vec<SessionOutputEntry> = if args.modules.is_empty() {
        ctx.sessions()?
            .iter()
            .map(SessionOutputEntry::from_descriptor)
            .collect()
    } else {
        ctx.sessions_for(&args.modules)?
            .into_iter()
            .map(SessionOutputEntry::from_descriptor)
            .collect()
    };

    Ok((
        SessionsOutput {
            command: "sessions.list".to_string(),
            modules: args.modules,
            sessions,
        },
        0,
    ))
}

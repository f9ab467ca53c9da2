//! Session registry construction and module-scoped selection.

use crate::config::AppConfig;
use crate::credentials::{self, SessionDescriptor};
use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};

/// The full server-name → session-descriptor map for one invocation.
///
/// Built exactly once (the context memoizes it) and read-only after.
/// Enumeration order is sorted server name, which is the order every
/// selection result follows.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: BTreeMap<String, SessionDescriptor>,
}

impl SessionRegistry {
    /// Resolve credentials for every server entry, each exactly once.
    ///
    /// `agent_socket` is the ssh-agent socket environment value shared
    /// by all resolutions. Any single resolution failure fails the
    /// whole build; a partially-resolved registry never escapes.
    pub fn build(config: &AppConfig, agent_socket: Option<&str>) -> Result<Self> {
        let mut sessions = BTreeMap::new();

        for (name, server) in &config.servers {
            let descriptor = credentials::resolve(server, agent_socket)?;
            sessions.insert(name.clone(), descriptor);
        }

        Ok(Self { sessions })
    }

    pub fn get(&self, name: &str) -> Option<&SessionDescriptor> {
        self.sessions.get(name)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// All descriptors in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &SessionDescriptor> {
        self.sessions.values()
    }

    /// Descriptors for the servers declared by the named modules.
    ///
    /// Module names without a config section are silently skipped, as
    /// are declared server names with no registry entry: partial or
    /// optional module configuration is tolerated, not an error. A
    /// server named by several modules appears once, and results follow
    /// the registry's own enumeration order.
    pub fn select<'a>(
        &'a self,
        config: &AppConfig,
        module_names: &[String],
    ) -> Vec<&'a SessionDescriptor> {
        let mut wanted: BTreeSet<&str> = BTreeSet::new();

        for module_name in module_names {
            let Some(module) = config.module(module_name) else {
                continue;
            };
            for server in &module.servers {
                wanted.insert(server.as_str());
            }
        }

        self.sessions
            .values()
            .filter(|descriptor| wanted.contains(descriptor.name.as_str()))
            .collect()
    }
}

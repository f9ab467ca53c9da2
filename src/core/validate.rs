//! Advisory configuration validation.
//!
//! Problems reported here are printed once when the config first loads
//! and never block task execution.

use crate::config::AppConfig;

/// Human-readable problems in a parsed config. Empty means clean.
pub fn validate(config: &AppConfig) -> Vec<String> {
    let mut problems = Vec::new();

    if config.servers.is_empty() {
        problems.push("no servers configured".to_string());
    }

    for (name, server) in &config.servers {
        if server.host.is_empty() {
            problems.push(format!("server '{}' has an empty host", name));
        }
        if server.username.is_empty() {
            problems.push(format!("server '{}' has an empty username", name));
        }
        if server.pem.is_some() && server.password.is_some() {
            problems.push(format!(
                "server '{}' sets both pem and password; pem takes precedence",
                name
            ));
        }
    }

    for (module_name, module) in &config.modules {
        for server_name in &module.servers {
            if !config.servers.contains_key(server_name) {
                problems.push(format!(
                    "module '{}' references unknown server '{}'",
                    module_name, server_name
                ));
            }
        }
    }

    for event in config.hooks.keys() {
        if !event.starts_with("pre.") && !event.starts_with("post.") {
            problems.push(format!(
                "hook '{}' is not phase-qualified (expected pre.<task> or post.<task>)",
                event
            ));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> AppConfig {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn clean_config_has_no_problems() {
        let config = parse(
            r#"{
                "servers": {"one": {"host": "h", "username": "u", "password": "p"}},
                "app": {"servers": ["one"]},
                "hooks": {"pre.deploy": "echo hi"}
            }"#,
        );
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn reports_unknown_server_reference() {
        let config = parse(
            r#"{
                "servers": {"one": {"host": "h", "username": "u", "password": "p"}},
                "app": {"servers": ["one", "phantom"]}
            }"#,
        );
        let problems = validate(&config);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("phantom"));
        assert!(problems[0].contains("app"));
    }

    #[test]
    fn reports_ambiguous_auth_and_bad_hook_keys() {
        let config = parse(
            r#"{
                "servers": {"one": {"host": "h", "username": "u", "pem": "/k", "password": "p"}},
                "hooks": {"during.deploy": "echo hm"}
            }"#,
        );
        let problems = validate(&config);
        assert!(problems.iter().any(|p| p.contains("pem takes precedence")));
        assert!(problems.iter().any(|p| p.contains("during.deploy")));
    }

    #[test]
    fn reports_empty_inventory() {
        let config = parse(r#"{"servers": {}}"#);
        assert_eq!(validate(&config), vec!["no servers configured".to_string()]);
    }
}

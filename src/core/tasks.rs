//! Task registry and the hook-wrapped task execution state machine.
//!
//! A run moves PreHooks → TaskBody → PostHooks; an empty or unknown
//! task name is rejected before any hook runs. Task bodies are external
//! to the core (registered by the binary or by library consumers) and
//! receive the orchestration context.

use crate::context::OrchestrationContext;
use crate::error::{Error, Result};
use crate::hooks::{self, HookRegistry, Phase};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A task body: operates on the context, produces a JSON-shaped result
/// or a failure.
pub type TaskFn = Box<dyn Fn(&OrchestrationContext) -> Result<Value>>;

#[derive(Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, TaskFn>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, body: TaskFn) {
        self.tasks.insert(name.into(), body);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<&TaskFn> {
        self.tasks.get(name)
    }
}

/// Report of one completed task run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRun {
    pub task: String,
    pub pre_hooks: usize,
    pub post_hooks: usize,
    pub result: Value,
}

/// Run a named task through its hook pipeline.
///
/// 1. Missing/empty name: diagnostic, `EmptyTaskName`, no hooks run.
/// 2. Unknown name: diagnostic naming it, `UnknownTaskName` with
///    near-miss hints, no hooks run.
/// 3. Otherwise pre hooks, then the body, then post hooks, strictly in
///    that order. A body failure propagates unmodified and suppresses
///    the post hooks.
pub fn run_task(
    name: Option<&str>,
    tasks: &TaskRegistry,
    hook_registry: &HookRegistry,
    ctx: &OrchestrationContext,
) -> Result<TaskRun> {
    let name = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => {
            log_status!("task", "No task name provided");
            return Err(Error::empty_task_name());
        }
    };

    let Some(body) = tasks.get(name) else {
        log_status!("task", "Unknown task '{}'", name);
        return Err(Error::unknown_task(name, similar_names(name, &tasks.names())));
    };

    let pre = hooks::run_phase(hook_registry, Phase::Pre, name, ctx)?;
    if ctx.verbose() && pre.ran > 0 {
        log_status!("task", "Ran {} pre hooks for '{}'", pre.ran, name);
    }

    let result = body(ctx)?;

    let post = hooks::run_phase(hook_registry, Phase::Post, name, ctx)?;
    if ctx.verbose() && post.ran > 0 {
        log_status!("task", "Ran {} post hooks for '{}'", post.ran, name);
    }

    Ok(TaskRun {
        task: name.to_string(),
        pre_hooks: pre.ran,
        post_hooks: post.ran,
        result,
    })
}

// ============================================================================
// Near-miss suggestions
// ============================================================================

/// Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Task names similar to the given one: prefix matches first, then
/// close edits. Up to 3 results.
fn similar_names(target: &str, names: &[String]) -> Vec<String> {
    let target_lower = target.to_lowercase();
    let mut matches: Vec<(String, usize)> = Vec::new();

    for name in names {
        let name_lower = name.to_lowercase();
        if name_lower.starts_with(&target_lower) && name_lower != target_lower {
            matches.push((name.clone(), 0));
            continue;
        }
        let dist = levenshtein(&target_lower, &name_lower);
        if dist > 0 && dist <= 3 {
            matches.push((name.clone(), dist + 10));
        }
    }

    matches.sort_by_key(|(_, priority)| *priority);
    matches.into_iter().take(3).map(|(name, _)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookHandler;
    use crate::ErrorCode;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn ctx() -> (TempDir, OrchestrationContext) {
        let dir = TempDir::new().unwrap();
        let ctx = OrchestrationContext::new(dir.path());
        (dir, ctx)
    }

    fn tracked_registry(seen: &Rc<RefCell<Vec<&'static str>>>) -> (TaskRegistry, HookRegistry) {
        let mut tasks = TaskRegistry::new();
        let tracker = Rc::clone(seen);
        tasks.register(
            "deploy",
            Box::new(move |_| {
                tracker.borrow_mut().push("body");
                Ok(json!({"deployed": true}))
            }),
        );

        let mut hook_registry = HookRegistry::new();
        let tracker = Rc::clone(seen);
        hook_registry.register(
            "pre.deploy",
            HookHandler::Func(Box::new(move |_| {
                tracker.borrow_mut().push("pre");
                Ok(())
            })),
        );
        let tracker = Rc::clone(seen);
        hook_registry.register(
            "post.deploy",
            HookHandler::Func(Box::new(move |_| {
                tracker.borrow_mut().push("post");
                Ok(())
            })),
        );

        (tasks, hook_registry)
    }

    #[test]
    fn missing_and_empty_names_run_nothing() {
        let (_dir, ctx) = ctx();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (tasks, hook_registry) = tracked_registry(&seen);

        let err = run_task(None, &tasks, &hook_registry, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyTaskName);

        let err = run_task(Some(""), &tasks, &hook_registry, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyTaskName);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn unknown_name_runs_nothing_and_suggests() {
        let (_dir, ctx) = ctx();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (tasks, hook_registry) = tracked_registry(&seen);

        let err = run_task(Some("deplo"), &tasks, &hook_registry, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownTaskName);
        assert!(err.message.contains("deplo"));
        assert!(err.hints.iter().any(|h| h.contains("deploy")));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn run_order_is_pre_body_post() {
        let (_dir, ctx) = ctx();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (tasks, hook_registry) = tracked_registry(&seen);

        let run = run_task(Some("deploy"), &tasks, &hook_registry, &ctx).unwrap();
        assert_eq!(*seen.borrow(), vec!["pre", "body", "post"]);
        assert_eq!(run.pre_hooks, 1);
        assert_eq!(run.post_hooks, 1);
        assert_eq!(run.result["deployed"], true);
    }

    #[test]
    fn body_failure_suppresses_post_hooks_and_propagates_unmodified() {
        let (_dir, ctx) = ctx();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let mut tasks = TaskRegistry::new();
        tasks.register(
            "deploy",
            Box::new(|_| Err(Error::internal_unexpected("bundle step failed"))),
        );

        let mut hook_registry = HookRegistry::new();
        let tracker = Rc::clone(&seen);
        hook_registry.register(
            "post.deploy",
            HookHandler::Func(Box::new(move |_| {
                tracker.borrow_mut().push("post");
                Ok(())
            })),
        );

        let err = run_task(Some("deploy"), &tasks, &hook_registry, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalUnexpected);
        assert_eq!(err.message, "bundle step failed");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn pre_hook_failure_suppresses_the_body() {
        let (_dir, ctx) = ctx();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let mut tasks = TaskRegistry::new();
        let tracker = Rc::clone(&seen);
        tasks.register(
            "deploy",
            Box::new(move |_| {
                tracker.borrow_mut().push("body");
                Ok(Value::Null)
            }),
        );

        let mut hook_registry = HookRegistry::new();
        hook_registry.register(
            "pre.deploy",
            HookHandler::Func(Box::new(|_| Err(Error::internal_unexpected("nope")))),
        );

        assert!(run_task(Some("deploy"), &tasks, &hook_registry, &ctx).is_err());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn similar_names_prefers_prefix_matches() {
        let names = vec!["deploy".to_string(), "destroy".to_string(), "logs".to_string()];
        let suggestions = similar_names("dep", &names);
        assert_eq!(suggestions.first().map(String::as_str), Some("deploy"));
        assert!(!suggestions.contains(&"logs".to_string()));
    }
}

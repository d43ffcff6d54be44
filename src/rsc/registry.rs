//! Section handler registry & dispatch
//!
//! Lookup order for a resolved section path: exact match, then glob
//! patterns in registration order, then the generic fallback. The registry
//! is assembled once at composition time and is read-only afterwards, so
//! concurrent parses can share it without locking.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::rsc::error::HandlerResult;
use crate::rsc::handlers;
use crate::rsc::model::{Command, Summary};

/// Typed extraction for one section family.
///
/// Handlers are stateless: `parse_command` types one command line and
/// `summarize` folds a section's commands into a flat summary. The per-parse
/// command list lives in the driver.
pub trait SectionHandler: Send + Sync {
    fn parse_command(&self, line: &str) -> HandlerResult<Command>;
    fn summarize(&self, commands: &[Command]) -> Summary;
}

/// Registry of section handlers.
pub struct HandlerRegistry {
    exact: HashMap<String, Arc<dyn SectionHandler>>,
    patterns: Vec<(String, Regex, Arc<dyn SectionHandler>)>,
    generic: Arc<dyn SectionHandler>,
}

impl HandlerRegistry {
    /// Create an empty registry; every path resolves to the generic handler.
    pub fn new() -> Self {
        HandlerRegistry {
            exact: HashMap::new(),
            patterns: Vec::new(),
            generic: Arc::new(handlers::generic::GenericHandler),
        }
    }

    /// Register a handler for a section path or glob pattern.
    ///
    /// Paths containing `*` or `?` are treated as glob patterns and tested
    /// in registration order; exact paths always win over patterns.
    /// Registering the same path again replaces the earlier handler.
    pub fn register<H: SectionHandler + 'static>(&mut self, path: &str, handler: H) {
        self.register_arc(path, Arc::new(handler));
    }

    fn register_arc(&mut self, path: &str, handler: Arc<dyn SectionHandler>) {
        if path.contains('*') || path.contains('?') {
            let regex = glob_to_regex(path);
            self.patterns.push((path.to_string(), regex, handler));
        } else {
            self.exact.insert(path.to_string(), handler);
        }
    }

    /// Resolve the handler for a section path.
    pub fn resolve(&self, path: &str) -> Arc<dyn SectionHandler> {
        if let Some(handler) = self.exact.get(path) {
            return Arc::clone(handler);
        }
        for (_, regex, handler) in &self.patterns {
            if regex.is_match(path) {
                return Arc::clone(handler);
            }
        }
        Arc::clone(&self.generic)
    }

    /// All registered paths and patterns, exact paths first (sorted),
    /// patterns in registration order.
    pub fn registered_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.exact.keys().cloned().collect();
        paths.sort();
        paths.extend(self.patterns.iter().map(|(p, _, _)| p.clone()));
        paths
    }

    /// Registry with the default RouterOS section handlers.
    pub fn with_defaults() -> Self {
        let mut registry = HandlerRegistry::new();
        handlers::register_defaults(&mut registry);
        registry
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Compile a glob pattern (`*` and `?` wildcards) into an anchored regex.
fn glob_to_regex(pattern: &str) -> Regex {
    let escaped = regex::escape(pattern)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    // Escaped literal input; the resulting pattern is always valid.
    Regex::new(&format!("^{escaped}$")).expect("valid glob pattern")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsc::error::HandlerError;

    struct Marker(&'static str);

    impl SectionHandler for Marker {
        fn parse_command(&self, _line: &str) -> HandlerResult<Command> {
            Err(HandlerError::new(self.0))
        }

        fn summarize(&self, _commands: &[Command]) -> Summary {
            let mut summary = Summary::new();
            summary.insert("marker".into(), self.0.into());
            summary
        }
    }

    fn marker_of(registry: &HandlerRegistry, path: &str) -> String {
        registry
            .resolve(path)
            .summarize(&[])
            .get("marker")
            .and_then(|v| v.as_str())
            .unwrap_or("generic")
            .to_string()
    }

    #[test]
    fn exact_match_beats_pattern() {
        let mut registry = HandlerRegistry::new();
        registry.register("/interface pppoe-*", Marker("pattern"));
        registry.register("/interface pppoe-client", Marker("exact"));
        assert_eq!(marker_of(&registry, "/interface pppoe-client"), "exact");
        assert_eq!(marker_of(&registry, "/interface pppoe-server"), "pattern");
    }

    #[test]
    fn first_registered_pattern_wins() {
        let mut registry = HandlerRegistry::new();
        registry.register("/system*", Marker("first"));
        registry.register("/system *", Marker("second"));
        assert_eq!(marker_of(&registry, "/system watchdog"), "first");
    }

    #[test]
    fn unmatched_path_falls_back_to_generic() {
        let registry = HandlerRegistry::new();
        let handler = registry.resolve("/certainly unknown");
        let summary = handler.summarize(&[]);
        assert_eq!(summary["command_count"], 0);
    }

    #[test]
    fn glob_is_anchored() {
        let mut registry = HandlerRegistry::new();
        registry.register("/ip*", Marker("ip"));
        assert_eq!(marker_of(&registry, "/ipv6 address"), "ip");
        assert_eq!(marker_of(&registry, "/snmp"), "generic");
    }

    #[test]
    fn default_registry_lists_paths() {
        let registry = HandlerRegistry::with_defaults();
        let paths = registry.registered_paths();
        assert!(paths.iter().any(|p| p == "/ip firewall filter"));
        assert!(paths.iter().any(|p| p == "/interface pppoe-*"));
    }
}

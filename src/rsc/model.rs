//! Data model for parsed configurations
//!
//! Everything here is created and fully populated inside one `parse()` call
//! and is read-only afterwards. `Summary` values are `serde_json` maps so
//! that heterogeneous count/classification data serializes without a
//! bespoke value type per handler.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::rsc::registry::SectionHandler;

/// Flat string-keyed summary produced by a handler for display tooling.
pub type Summary = serde_json::Map<String, serde_json::Value>;

/// Action verb of one configuration command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Set,
    Remove,
    /// Lines the export grammar does not cover, such as `:delay` scripting
    /// directives. Kept opaque in `Command::raw`.
    Unknown,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Set => "set",
            Action::Remove => "remove",
            Action::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter value after tokenization and typed extraction.
///
/// Base tokenization produces only `Str` and `Bool(true)` (bare flags);
/// handlers replace or add entries with the richer variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
    Ints(Vec<i64>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<i64>> for Value {
    fn from(items: Vec<i64>) -> Self {
        Value::Ints(items)
    }
}

/// One `add`/`set`/`remove` statement and its parameters.
///
/// Keys are unique; a later duplicate overwrites an earlier one within the
/// same command. The original line is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub action: Action,
    pub params: BTreeMap<String, Value>,
    pub raw: String,
}

impl Command {
    pub fn new(action: Action, raw: impl Into<String>) -> Self {
        Command {
            action,
            params: BTreeMap::new(),
            raw: raw.into(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn str_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }

    pub fn bool_param(&self, key: &str) -> Option<bool> {
        self.params.get(key).and_then(Value::as_bool)
    }

    pub fn int_param(&self, key: &str) -> Option<i64> {
        self.params.get(key).and_then(Value::as_int)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }
}

/// Failure while handling one section. Non-fatal to the rest of the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub section: String,
    pub message: String,
    pub line_count: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} lines affected)",
            self.section, self.message, self.line_count
        )
    }
}

/// A resolved section path and its ordered commands.
///
/// Command order is significant; later commands may reference names
/// declared by earlier ones.
#[derive(Clone, Serialize)]
pub struct Section {
    pub path: String,
    pub commands: Vec<Command>,
    #[serde(skip)]
    handler: Arc<dyn SectionHandler>,
}

impl Section {
    pub fn new(
        path: impl Into<String>,
        commands: Vec<Command>,
        handler: Arc<dyn SectionHandler>,
    ) -> Self {
        Section {
            path: path.into(),
            commands,
            handler,
        }
    }

    /// Handler-specific flat summary of counts and classifications.
    pub fn summarize(&self) -> Summary {
        self.handler.summarize(&self.commands)
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("path", &self.path)
            .field("commands", &self.commands)
            .finish()
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.commands == other.commands
    }
}

/// Complete parsed configuration for one device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    pub device_name: Option<String>,
    pub sections: BTreeMap<String, Section>,
    pub errors: Vec<ParseError>,
}

impl Configuration {
    pub fn section(&self, path: &str) -> Option<&Section> {
        self.sections.get(path)
    }

    /// Device name declared in `/system identity`, if that section parsed.
    pub fn identity(&self) -> Option<&str> {
        self.sections
            .get("/system identity")
            .and_then(|section| section.commands.iter().rev().find_map(|c| c.str_param("name")))
    }

    /// Device-level summary: name, section list, error count, and every
    /// section's own summary. This is the structure display formatters
    /// consume.
    pub fn device_summary(&self) -> Summary {
        let device_name = self
            .device_name
            .as_deref()
            .or_else(|| self.identity())
            .unwrap_or("Unknown Device");

        let mut summary = Summary::new();
        summary.insert("device_name".into(), device_name.into());
        summary.insert("sections_parsed".into(), self.sections.len().into());
        summary.insert(
            "section_list".into(),
            self.sections.keys().cloned().collect::<Vec<_>>().into(),
        );
        summary.insert("parsing_errors".into(), self.errors.len().into());

        let mut per_section = Summary::new();
        for (path, section) in &self.sections {
            per_section.insert(path.clone(), section.summarize().into());
        }
        summary.insert("section_summaries".into(), per_section.into());

        if !self.errors.is_empty() {
            let errors: Vec<serde_json::Value> = self
                .errors
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "section": e.section,
                        "error": e.message,
                        "line_count": e.line_count,
                    })
                })
                .collect();
            summary.insert("errors".into(), errors.into());
        }

        summary
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

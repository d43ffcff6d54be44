//! Parameter tokenization
//!
//! One logical command line is split into an action verb and a sequence of
//! `key=value` / bare-flag tokens. The split is quote-aware: a `"` toggles
//! the in-quotes flag, and whitespace separates tokens only outside quotes.
//! Key/value splitting stops at the first `=`, so embedded `=` characters
//! inside a value survive intact.

use crate::rsc::model::{Action, Command, Value};

/// Split the leading action verb off a command line.
///
/// `add`/`set`/`remove` are recognized; a leading `:` marks a scripting
/// directive the export grammar does not cover ([`Action::Unknown`]);
/// anything else defaults to `set` with the whole line as parameters.
pub fn split_action(line: &str) -> (Action, &str) {
    let line = line.trim();
    if line.starts_with(':') {
        return (Action::Unknown, "");
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };
    match verb {
        "add" => (Action::Add, rest),
        "set" => (Action::Set, rest),
        "remove" => (Action::Remove, rest),
        _ => (Action::Set, line),
    }
}

/// Quote-aware split of a parameter string into raw tokens.
pub fn split_parameters(params: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in params.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch.is_whitespace() && !in_quotes {
            if !current.trim().is_empty() {
                tokens.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }
    if !current.trim().is_empty() {
        tokens.push(current.trim().to_string());
    }

    tokens
}

/// Split one token at the first `=` into key and value.
///
/// Returns `(token, None)` for bare flags. A single pair of surrounding
/// quotes is stripped from the value.
pub fn split_key_value(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((key, value)) => (key.trim(), Some(strip_quotes(value.trim()))),
        None => (token, None),
    }
}

/// Strip one surrounding pair of double quotes, if present.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Base tokenization of one command line: action verb plus a parameter map
/// of strings and boolean flags. Handlers refine the result with typed
/// coercions.
pub fn parse_command_line(line: &str) -> Command {
    let (action, params) = split_action(line);
    let mut command = Command::new(action, line);

    for token in split_parameters(params) {
        let (key, value) = split_key_value(&token);
        match value {
            Some(value) => command.insert(key, value),
            None => command.insert(token.as_str(), true),
        }
    }

    command
}

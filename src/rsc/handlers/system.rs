//! System family handlers: identity, clock, users and login note

use crate::rsc::error::HandlerResult;
use crate::rsc::extract::{coerce_bool, parse_bool};
use crate::rsc::model::{Command, Summary, Value};
use crate::rsc::registry::SectionHandler;
use crate::rsc::tokenize::parse_command_line;

/// Handler for `/system identity`.
pub struct IdentityHandler;

impl SectionHandler for IdentityHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        Ok(parse_command_line(line))
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let name = commands
            .iter()
            .rev()
            .find_map(|c| c.str_param("name"))
            .unwrap_or("unknown");

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert("device_name".into(), name.into());
        summary
    }
}

/// Handler for `/system clock`.
pub struct ClockHandler;

impl SectionHandler for ClockHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(tz) = command.str_param("time-zone-name").map(str::to_string) {
            command.insert("timezone", tz);
        }
        if let Some(value) = command.str_param("time-zone-autodetect").map(str::to_string) {
            command.insert("autodetect_timezone", parse_bool(&value));
        }

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let timezone = commands
            .iter()
            .rev()
            .find_map(|c| c.str_param("timezone"))
            .unwrap_or("unknown");

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert("timezone".into(), timezone.into());
        summary
    }
}

/// Handler for `/user`. Passwords never survive parsing; only their
/// presence and length do.
pub struct UserHandler;

impl SectionHandler for UserHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(group) = command.str_param("group") {
            let level = match group {
                "full" => "admin",
                "read" | "write" => "user",
                _ => "custom",
            };
            command.insert("privilege_level", level);
        }
        coerce_bool(&mut command, "disabled");
        if let Some(Value::Str(password)) = command.params.remove("password") {
            command.insert("has_password", true);
            command.insert("password_length", password.len() as i64);
        }

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let users: Vec<String> = commands
            .iter()
            .filter_map(|c| c.str_param("name"))
            .map(str::to_string)
            .collect();
        let admins: Vec<String> = commands
            .iter()
            .filter(|c| c.str_param("privilege_level") == Some("admin"))
            .filter_map(|c| c.str_param("name"))
            .map(str::to_string)
            .collect();

        let mut summary = Summary::new();
        summary.insert("user_count".into(), commands.len().into());
        summary.insert("user_list".into(), users.into());
        summary.insert("admin_users".into(), admins.into());
        summary
    }
}

/// Handler for `/system note`.
pub struct NoteHandler;

impl SectionHandler for NoteHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(value) = command.str_param("show-at-login").map(str::to_string) {
            command.insert("login_message", parse_bool(&value));
        }
        if let Some(note) = command.str_param("note").map(str::to_string) {
            command.insert("note_text", note);
        }

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        super::command_count_summary(commands.len())
    }
}

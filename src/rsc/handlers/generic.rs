//! Generic fallback handler

use crate::rsc::error::HandlerResult;
use crate::rsc::handlers::command_count_summary;
use crate::rsc::model::{Command, Summary};
use crate::rsc::registry::SectionHandler;
use crate::rsc::tokenize::parse_command_line;

/// Handler for sections without a registered typed handler. Performs base
/// tokenization only; every parameter stays a string or a boolean flag.
pub struct GenericHandler;

impl SectionHandler for GenericHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        Ok(parse_command_line(line))
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        command_count_summary(commands.len())
    }
}

//! Parse driver
//!
//! Ties the pipeline together: normalize the raw export, split it into
//! sections, resolve a handler per section and hand it every line. A
//! handler failure is recorded as a [`ParseError`] and the remaining
//! sections still parse.

use std::sync::Arc;

use crate::rsc::model::{Command, Configuration, ParseError, Section};
use crate::rsc::normalize::normalize;
use crate::rsc::registry::HandlerRegistry;
use crate::rsc::splitter::{discover, split_sections};

pub struct Parser {
    registry: Arc<HandlerRegistry>,
}

impl Parser {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Parser { registry }
    }

    /// A parser backed by the built-in handler table.
    pub fn with_defaults() -> Self {
        Parser::new(Arc::new(HandlerRegistry::with_defaults()))
    }

    /// Parse a full export. `device_name` overrides the name found in
    /// `/system identity` when building summaries.
    pub fn parse(&self, text: &str, device_name: Option<&str>) -> Configuration {
        let lines = normalize(text);
        let grouped = split_sections(&lines);

        let mut configuration = Configuration {
            device_name: device_name.map(str::to_string),
            sections: std::collections::BTreeMap::new(),
            errors: Vec::new(),
        };

        for (path, section_lines) in grouped {
            let handler = self.registry.resolve(&path);
            let parsed: Result<Vec<Command>, _> = section_lines
                .iter()
                .map(|line| handler.parse_command(line))
                .collect();
            match parsed {
                Ok(commands) => {
                    let section = Section::new(path.clone(), commands, handler);
                    configuration.sections.insert(path, section);
                }
                Err(error) => configuration.errors.push(ParseError {
                    section: path,
                    message: error.message,
                    line_count: section_lines.len(),
                }),
            }
        }

        configuration
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::with_defaults()
    }
}

/// Section paths present in an export, sorted, without parsing commands.
pub fn discover_sections(text: &str) -> Vec<String> {
    discover(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_with_resolved_handlers() {
        let parser = Parser::with_defaults();
        let config = parser.parse(
            "/system identity\nset name=test-router\n/ip address\nadd address=10.0.0.1/24 interface=ether1\n",
            None,
        );
        assert!(config.errors.is_empty());
        assert_eq!(config.identity(), Some("test-router"));
        let section = config.section("/ip address").unwrap();
        assert_eq!(section.commands[0].str_param("network"), Some("10.0.0.0"));
    }

    #[test]
    fn device_name_argument_overrides_identity() {
        let parser = Parser::with_defaults();
        let config = parser.parse("/system identity\nset name=from-export\n", Some("from-caller"));
        assert_eq!(config.device_summary()["device_name"], "from-caller");
    }

    #[test]
    fn discover_lists_paths_without_parsing() {
        let paths = discover_sections("/ip address\nadd address=1.2.3.4\n/system clock\nset time-zone-name=UTC\n");
        assert_eq!(paths, vec!["/ip address", "/system clock"]);
    }
}

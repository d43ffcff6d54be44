//! SNMP community handler

use crate::rsc::error::HandlerResult;
use crate::rsc::extract::{coerce_bool, extract_ip_network, parse_bool, split_list};
use crate::rsc::model::{Command, Summary, Value};
use crate::rsc::registry::SectionHandler;
use crate::rsc::tokenize::parse_command_line;

/// Handler for `/snmp community`. Community strings are treated like
/// credentials: the raw value is removed and replaced with derived fields.
pub struct SnmpCommunityHandler;

impl SectionHandler for SnmpCommunityHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(Value::Str(name)) = command.params.remove("name") {
            command.insert("is_default", name == "public" || name == "private");
            command.insert("community_length", name.len() as i64);
            command.insert("community_name", name);
        }

        if let Some(Value::Str(security)) = command.params.remove("security") {
            command.insert("read_only", security == "none");
            command.insert("read_write", security == "private");
            command.insert("security_level", security);
        }
        if let Some(Value::Str(value)) = command.params.remove("read-access") {
            command.insert("read_access", parse_bool(&value));
        }
        if let Some(Value::Str(value)) = command.params.remove("write-access") {
            command.insert("write_access", parse_bool(&value));
        }

        if let Some(Value::Str(value)) = command.params.remove("addresses") {
            let addresses = split_list(&value);
            let networks: Vec<_> = addresses
                .iter()
                .filter_map(|a| extract_ip_network(a.as_str()))
                .collect();
            let private = networks.iter().filter(|net| net.is_private()).count();
            command.insert("address_count", addresses.len() as i64);
            command.insert("restricted_access", !addresses.is_empty());
            command.insert("valid_addresses", networks.len() as i64);
            command.insert("private_addresses", private as i64);
            command.insert("allowed_addresses", addresses);
        }

        coerce_bool(&mut command, "disabled");

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let defaults = commands
            .iter()
            .filter(|c| c.bool_param("is_default") == Some(true))
            .count();

        let mut summary = Summary::new();
        summary.insert("community_count".into(), commands.len().into());
        summary.insert("default_communities".into(), defaults.into());
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_name_becomes_derived_fields() {
        let command = SnmpCommunityHandler
            .parse_command("add name=public security=none read-access=yes")
            .unwrap();
        assert!(command.get("name").is_none());
        assert_eq!(command.str_param("community_name"), Some("public"));
        assert_eq!(command.bool_param("is_default"), Some(true));
        assert_eq!(command.int_param("community_length"), Some(6));
        assert_eq!(command.bool_param("read_only"), Some(true));
        assert_eq!(command.bool_param("read_access"), Some(true));
    }

    #[test]
    fn addresses_restrict_and_classify() {
        let command = SnmpCommunityHandler
            .parse_command("add name=ops addresses=10.0.0.0/24,203.0.113.5,bogus")
            .unwrap();
        assert_eq!(command.int_param("address_count"), Some(3));
        assert_eq!(command.int_param("valid_addresses"), Some(2));
        assert_eq!(command.int_param("private_addresses"), Some(1));
        assert_eq!(command.bool_param("restricted_access"), Some(true));
        assert_eq!(command.bool_param("is_default"), Some(false));
    }

    #[test]
    fn summary_counts_default_communities() {
        let commands = vec![
            SnmpCommunityHandler.parse_command("add name=public").unwrap(),
            SnmpCommunityHandler.parse_command("add name=netops").unwrap(),
        ];
        let summary = SnmpCommunityHandler.summarize(&commands);
        assert_eq!(summary["community_count"], 2);
        assert_eq!(summary["default_communities"], 1);
    }
}

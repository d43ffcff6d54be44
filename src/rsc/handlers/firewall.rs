//! Firewall family handlers (filter/mangle/raw rules, NAT, address lists)

use std::collections::BTreeMap;

use crate::rsc::error::HandlerResult;
use crate::rsc::extract::{
    classify_firewall_action, coerce_bool, extract_ip_network, parse_duration_seconds_i64,
    parse_interface_reference, parse_port_range, split_list,
};
use crate::rsc::model::{Command, Summary};
use crate::rsc::registry::SectionHandler;
use crate::rsc::tokenize::parse_command_line;

/// Shared rule coercions for filter, mangle, raw and NAT chains.
fn coerce_rule_fields(command: &mut Command) {
    if let Some(action) = command.str_param("action").map(str::to_string) {
        let class = classify_firewall_action(&action);
        command.insert("action_type", class.kind);
        command.insert("action_description", class.description);
    }

    for key in ["src-address", "dst-address"] {
        let value = match command.str_param(key).map(str::to_string) {
            Some(value) => value,
            None => continue,
        };
        let address = match value.strip_prefix('!') {
            Some(rest) => {
                command.insert(format!("{key}_negated"), true);
                rest
            }
            None => value.as_str(),
        };
        if let Some(list) = address.strip_prefix(':') {
            // Address-list reference, not a literal address.
            command.insert(format!("{key}_type"), "address_list");
            command.insert(format!("{key}_list"), list);
        } else {
            command.insert(format!("{key}_type"), "ip");
            match extract_ip_network(address) {
                Some(net) => {
                    command.insert(format!("{key}_valid"), true);
                    command.insert(format!("{key}_is_private"), net.is_private());
                }
                None => command.insert(format!("{key}_valid"), false),
            }
        }
    }

    for key in ["src-port", "dst-port"] {
        let value = match command.str_param(key).map(str::to_string) {
            Some(value) => value,
            None => continue,
        };
        let spec = match value.strip_prefix('!') {
            Some(rest) => {
                command.insert(format!("{key}_negated"), true);
                rest
            }
            None => value.as_str(),
        };
        let ports: Vec<i64> = parse_port_range(spec).into_iter().map(i64::from).collect();
        command.insert(format!("{key}_count"), ports.len() as i64);
        command.insert(format!("{key}_list"), ports);
    }

    if let Some(protocol) = command.str_param("protocol") {
        let layer = match protocol {
            "tcp" | "udp" | "icmp" | "ipv6-icmp" => "layer4",
            "ip" | "ipv6" => "layer3",
            _ => "other",
        };
        command.insert("protocol_type", layer);
    }

    if let Some(value) = command.str_param("connection-state").map(str::to_string) {
        let states = split_list(&value);
        command.insert(
            "tracks_established",
            states.iter().any(|s| s == "established"),
        );
        command.insert("tracks_related", states.iter().any(|s| s == "related"));
        command.insert("connection_states", states);
    }

    for (key, derived) in [
        ("in-interface", "in_interface_type"),
        ("out-interface", "out_interface_type"),
    ] {
        if let Some(value) = command.str_param(key).map(str::to_string) {
            command.insert(derived, parse_interface_reference(&value).kind);
        }
    }

    coerce_bool(command, "disabled");
    coerce_bool(command, "invalid");

    if command.get("comment").is_some() {
        command.insert("has_comment", true);
    }
}

fn rules_by_key(commands: &[Command], key: &str) -> Summary {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for command in commands {
        let value = command.str_param(key).unwrap_or("unknown");
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    let mut summary = Summary::new();
    for (value, count) in counts {
        summary.insert(value, count.into());
    }
    summary
}

/// Handler shared by `/ip firewall filter`, `mangle`, `raw` and the IPv6
/// filter section.
pub struct FirewallRuleHandler;

impl SectionHandler for FirewallRuleHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);
        coerce_rule_fields(&mut command);
        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert("rules_by_chain".into(), rules_by_key(commands, "chain").into());
        summary.insert(
            "rules_by_action".into(),
            rules_by_key(commands, "action").into(),
        );
        summary
    }
}

/// Handler for `/ip firewall nat`.
pub struct FirewallNatHandler;

impl SectionHandler for FirewallNatHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);
        coerce_rule_fields(&mut command);

        let nat_type = match command.str_param("chain") {
            Some("srcnat") => "source_nat",
            Some("dstnat") => "destination_nat",
            _ => "unknown",
        };
        command.insert("nat_type", nat_type);

        match command.str_param("action") {
            Some("masquerade") => {
                command.insert("nat_action", "masquerade");
                command.insert("changes_source", true);
            }
            Some("src-nat") => {
                command.insert("nat_action", "source_nat");
                command.insert("changes_source", true);
            }
            Some("dst-nat") => {
                command.insert("nat_action", "destination_nat");
                command.insert("changes_destination", true);
            }
            Some("redirect") => {
                command.insert("nat_action", "redirect");
                command.insert("changes_destination", true);
            }
            _ => {}
        }

        if let Some(value) = command.str_param("to-addresses") {
            let count = value.split('-').count();
            command.insert("nat_address_range", count > 1);
            command.insert("nat_address_count", count as i64);
        }
        if let Some(value) = command.str_param("to-ports").map(str::to_string) {
            let ports = parse_port_range(&value);
            command.insert("nat_port_range", ports.len() > 1);
            command.insert("nat_port_count", ports.len() as i64);
        }

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let mut srcnat = 0usize;
        let mut dstnat = 0usize;
        for command in commands {
            match command.str_param("chain") {
                Some("srcnat") => srcnat += 1,
                Some("dstnat") => dstnat += 1,
                _ => {}
            }
        }

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        let mut nat_types = Summary::new();
        nat_types.insert("srcnat".into(), srcnat.into());
        nat_types.insert("dstnat".into(), dstnat.into());
        summary.insert("nat_types".into(), nat_types.into());
        summary
    }
}

/// Handler for `/ip firewall address-list` (and the IPv6 variant).
pub struct AddressListHandler;

impl SectionHandler for AddressListHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(value) = command.str_param("address").map(str::to_string) {
            match extract_ip_network(&value) {
                Some(net) => {
                    command.insert("address_valid", true);
                    command.insert("is_private", net.is_private());
                    command.insert("network", net.network.to_string());
                    command.insert("prefix", i64::from(net.prefix));
                }
                None => command.insert("address_valid", false),
            }
        }
        if let Some(list) = command.str_param("list").map(str::to_string) {
            command.insert("list_name", list);
        }
        if let Some(timeout) = command.str_param("timeout").map(str::to_string) {
            command.insert("timeout_seconds", parse_duration_seconds_i64(&timeout));
            command.insert("has_timeout", true);
        }
        coerce_bool(&mut command, "disabled");

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert(
            "entries_by_list".into(),
            rules_by_key(commands, "list").into(),
        );
        summary
    }
}

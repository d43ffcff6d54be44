//! Interface family handlers (`/interface`, bridges, bridge ports, VLANs)

use std::collections::BTreeMap;

use crate::rsc::error::HandlerResult;
use crate::rsc::extract::{
    coerce_bool, coerce_int, is_valid_vlan_id, parse_bool, parse_duration_seconds_i64,
};
use crate::rsc::model::{Command, Summary, Value};
use crate::rsc::registry::SectionHandler;
use crate::rsc::tokenize::parse_command_line;

/// Shared coercions for every interface-like section.
///
/// MAC addresses are kept verbatim even when malformed, so broken values
/// stay visible for inspection.
pub(crate) fn coerce_interface_fields(command: &mut Command) {
    coerce_int(command, "vlan-id");
    coerce_int(command, "mtu");
    coerce_int(command, "l2mtu");
    for key in ["disabled", "running", "slave"] {
        coerce_bool(command, key);
    }
}

/// Detect an interface type from its name prefix.
fn detect_interface_type(name: &str) -> &'static str {
    const PREFIXES: &[(&str, &str)] = &[
        ("ether", "ethernet"),
        ("wlan", "wireless"),
        ("bridge", "bridge"),
        ("vlan", "vlan"),
        ("bond", "bonding"),
        ("eoip", "eoip"),
        ("gre", "gre"),
        ("ipip", "ipip"),
        ("pppoe", "pppoe"),
        ("l2tp", "l2tp"),
        ("pptp", "pptp"),
        ("sstp", "sstp"),
        ("ovpn", "ovpn"),
        ("lte", "lte"),
    ];
    let name = name.to_ascii_lowercase();
    for (prefix, kind) in PREFIXES {
        if name.starts_with(prefix) {
            return kind;
        }
    }
    "unknown"
}

/// Handler for `/interface` and the plain per-type interface sections.
pub struct InterfaceHandler;

impl SectionHandler for InterfaceHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);
        coerce_interface_fields(&mut command);
        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
        for command in commands {
            if let Some(name) = command.str_param("name") {
                *by_type.entry(detect_interface_type(name)).or_insert(0) += 1;
            }
        }

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        let mut types = Summary::new();
        for (kind, count) in by_type {
            types.insert(kind.to_string(), count.into());
        }
        summary.insert("interfaces_by_type".into(), types.into());
        summary
    }
}

/// Handler for `/interface bridge`.
pub struct BridgeHandler;

impl SectionHandler for BridgeHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);
        coerce_interface_fields(&mut command);

        if let Some(stp) = command.str_param("stp").map(str::to_string) {
            command.insert("stp_enabled", parse_bool(&stp));
        }
        for (key, derived) in [
            ("forward-delay", "forward_delay_seconds"),
            ("max-age", "max_age_seconds"),
        ] {
            if let Some(value) = command.str_param(key).map(str::to_string) {
                command.insert(derived, parse_duration_seconds_i64(&value));
            }
        }
        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let names: Vec<String> = commands
            .iter()
            .filter_map(|c| c.str_param("name"))
            .map(str::to_string)
            .collect();

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert("bridge_names".into(), names.into());
        summary
    }
}

/// Handler for `/interface bridge port`.
pub struct BridgePortHandler;

impl SectionHandler for BridgePortHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);
        coerce_interface_fields(&mut command);

        if let Some(raw) = command.str_param("pvid").map(str::to_string) {
            match raw.parse::<i64>() {
                Ok(pvid) if is_valid_vlan_id(pvid) => command.insert("pvid", pvid),
                _ => command.insert("pvid_invalid", true),
            }
        }
        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let mut per_bridge: BTreeMap<String, usize> = BTreeMap::new();
        for command in commands {
            if let Some(bridge) = command.str_param("bridge") {
                *per_bridge.entry(bridge.to_string()).or_insert(0) += 1;
            }
        }

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        let mut bridges = Summary::new();
        for (bridge, count) in per_bridge {
            bridges.insert(bridge, count.into());
        }
        summary.insert("ports_by_bridge".into(), bridges.into());
        summary
    }
}

/// Handler for `/interface vlan`.
pub struct VlanHandler;

impl SectionHandler for VlanHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);
        coerce_interface_fields(&mut command);

        let invalid = match command.get("vlan-id") {
            Some(Value::Int(id)) => !is_valid_vlan_id(*id),
            Some(_) => true,
            None => false,
        };
        if invalid {
            command.insert("vlan_id_invalid", true);
        }
        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let labels: Vec<String> = commands
            .iter()
            .map(|c| {
                let id = c
                    .int_param("vlan-id")
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "?".to_string());
                let name = c.str_param("name").unwrap_or("unnamed");
                format!("VLAN {id} ({name})")
            })
            .collect();

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert("vlans".into(), labels.into());
        summary
    }
}

//! IP family handlers: addressing, routes, DHCP, DNS and service ports

use std::collections::BTreeSet;
use std::net::Ipv6Addr;

use crate::rsc::error::HandlerResult;
use crate::rsc::extract::{
    coerce_bool, coerce_int, extract_ip6_network, extract_ip_network, is_link_local_ip6,
    parse_duration_seconds_i64, parse_interface_reference, parse_port_range, split_list,
};
use crate::rsc::model::{Command, Summary};
use crate::rsc::registry::SectionHandler;
use crate::rsc::tokenize::parse_command_line;

/// Handler for address assignments: `/ip address`, `/ipv6 address`,
/// `/ip pool` and `/ip dhcp-client`.
pub struct IpAddressHandler;

impl SectionHandler for IpAddressHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(value) = command.str_param("address").map(str::to_string) {
            match extract_ip_network(&value) {
                Some(net) => {
                    command.insert("ip", net.address.to_string());
                    command.insert("network", net.network.to_string());
                    command.insert("prefix", i64::from(net.prefix));
                    command.insert("is_private", net.is_private());
                }
                None => command.insert("address_invalid", true),
            }
        }
        if let Some(value) = command.str_param("interface").map(str::to_string) {
            command.insert("interface_type", parse_interface_reference(&value).kind);
        }
        coerce_bool(&mut command, "disabled");
        coerce_bool(&mut command, "invalid");

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let networks: BTreeSet<String> = commands
            .iter()
            .filter_map(|c| {
                let network = c.str_param("network")?;
                let prefix = c.int_param("prefix")?;
                Some(format!("{network}/{prefix}"))
            })
            .collect();

        let mut summary = Summary::new();
        summary.insert("address_count".into(), commands.len().into());
        summary.insert(
            "networks".into(),
            networks.into_iter().collect::<Vec<_>>().into(),
        );
        summary
    }
}

/// Handler for `/ip route` and `/ipv6 route`.
pub struct IpRouteHandler;

impl SectionHandler for IpRouteHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(dst) = command.str_param("dst-address").map(str::to_string) {
            command.insert("is_default_route", dst == "0.0.0.0/0");
            if let Some(net) = extract_ip_network(&dst) {
                command.insert("dst_network", net.network.to_string());
                command.insert("dst_prefix", i64::from(net.prefix));
            }
        }
        if let Some(gateway) = command.str_param("gateway").map(str::to_string) {
            match extract_ip_network(&gateway) {
                Some(net) => {
                    command.insert("gateway_type", "ip");
                    command.insert("gateway_is_private", net.is_private());
                }
                None => command.insert("gateway_type", "interface"),
            }
        }
        coerce_int(&mut command, "distance");
        coerce_bool(&mut command, "disabled");
        coerce_bool(&mut command, "active");

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let defaults = commands
            .iter()
            .filter(|c| c.bool_param("is_default_route") == Some(true))
            .count();

        let mut summary = Summary::new();
        summary.insert("route_count".into(), commands.len().into());
        summary.insert("default_routes".into(), defaults.into());
        summary
    }
}

/// Handler for `/ipv6 address`; also registered for the `/ipv6 firewall`
/// sections, which share its address validation.
pub struct Ipv6AddressHandler;

impl SectionHandler for Ipv6AddressHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(value) = command.str_param("address").map(str::to_string) {
            match extract_ip6_network(&value) {
                Some(net) => {
                    command.insert("ipv6_valid", true);
                    command.insert("ipv6_address", net.address.to_string());
                    command.insert("ipv6_network", net.network.to_string());
                    command.insert("ipv6_prefix", i64::from(net.prefix));
                    command.insert("is_link_local", is_link_local_ip6(net.address));
                    command.insert("is_loopback", net.address.is_loopback());
                    command.insert("is_multicast", net.address.is_multicast());
                    command.insert("is_private", net.is_private());
                }
                None => command.insert("ipv6_valid", false),
            }
        }
        if let Some(value) = command.str_param("interface").map(str::to_string) {
            command.insert("interface_type", parse_interface_reference(&value).kind);
        }
        coerce_bool(&mut command, "disabled");

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        super::command_count_summary(commands.len())
    }
}

/// Handler for `/ipv6 route`. Mirrors [`IpRouteHandler`] with `::/0` as the
/// default-route literal.
pub struct Ipv6RouteHandler;

impl SectionHandler for Ipv6RouteHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(dst) = command.str_param("dst-address").map(str::to_string) {
            command.insert("is_default_route", dst == "::/0");
            match extract_ip6_network(&dst) {
                Some(net) => {
                    command.insert("dst_network", net.network.to_string());
                    command.insert("dst_prefix", i64::from(net.prefix));
                    command.insert("dst_valid", true);
                }
                None => command.insert("dst_valid", false),
            }
        }
        if let Some(gateway) = command.str_param("gateway").map(str::to_string) {
            match gateway.parse::<Ipv6Addr>() {
                Ok(address) => {
                    command.insert("gateway_type", "ipv6");
                    command.insert("gateway_is_link_local", is_link_local_ip6(address));
                    command.insert("gateway_valid", true);
                }
                Err(_) => {
                    command.insert("gateway_type", "interface");
                    command.insert("gateway_valid", false);
                }
            }
        }
        coerce_int(&mut command, "distance");
        coerce_bool(&mut command, "disabled");
        coerce_bool(&mut command, "active");

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let defaults = commands
            .iter()
            .filter(|c| c.bool_param("is_default_route") == Some(true))
            .count();

        let mut summary = Summary::new();
        summary.insert("route_count".into(), commands.len().into());
        summary.insert("default_routes".into(), defaults.into());
        summary
    }
}

/// Handler for `/ip dhcp-server` and `/ip dhcp-server network`.
pub struct DhcpServerHandler;

impl SectionHandler for DhcpServerHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(value) = command.str_param("lease-time").map(str::to_string) {
            command.insert("lease_time_seconds", parse_duration_seconds_i64(&value));
        }
        coerce_bool(&mut command, "disabled");
        coerce_bool(&mut command, "authoritative");

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        super::command_count_summary(commands.len())
    }
}

/// Handler for `/ip dns`.
pub struct DnsHandler;

impl SectionHandler for DnsHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(value) = command.str_param("servers").map(str::to_string) {
            let servers = split_list(&value);
            command.insert("server_count", servers.len() as i64);
            command.insert("servers", servers);
        }
        coerce_bool(&mut command, "allow-remote-requests");
        coerce_bool(&mut command, "cache-used");
        if let Some(size) = command.str_param("cache-size").map(str::to_string) {
            if let Ok(kib) = size.trim_end_matches("KiB").trim().parse::<i64>() {
                command.insert("cache_size_kib", kib);
            }
        }

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let mut summary = super::command_count_summary(commands.len());
        // DNS is a `set` section; the last declaration wins.
        if let Some(servers) = commands
            .iter()
            .rev()
            .find_map(|c| c.get("servers").and_then(|v| v.as_list()))
        {
            summary.insert("servers".into(), servers.to_vec().into());
        }
        summary
    }
}

/// Management-access label for a well-known RouterOS service name.
fn service_label(name: &str) -> Option<&'static str> {
    match name {
        "ssh" => Some("SSH"),
        "telnet" => Some("Telnet"),
        "www" => Some("WebFig"),
        "www-ssl" => Some("WebFig SSL"),
        "api" => Some("API"),
        "api-ssl" => Some("API SSL"),
        "winbox" => Some("Winbox"),
        "ftp" => Some("FTP"),
        _ => None,
    }
}

/// Handler for `/ip service`.
pub struct ServiceHandler;

impl SectionHandler for ServiceHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(value) = command.str_param("port").map(str::to_string) {
            let ports: Vec<i64> = parse_port_range(&value).into_iter().map(i64::from).collect();
            if !ports.is_empty() {
                command.insert("ports", ports);
            }
        }
        coerce_bool(&mut command, "disabled");
        let enabled = command.bool_param("disabled") != Some(true);
        command.insert("enabled", enabled);
        if let Some(value) = command.str_param("address").map(str::to_string) {
            command.insert("allowed_addresses", split_list(&value));
        }

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let enabled: Vec<&Command> = commands
            .iter()
            .filter(|c| c.bool_param("enabled") == Some(true))
            .collect();
        let management: Vec<String> = enabled
            .iter()
            .filter_map(|c| c.str_param("name").and_then(service_label))
            .map(str::to_string)
            .collect();

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert("enabled_services".into(), enabled.len().into());
        summary.insert("management_access".into(), management.into());
        summary
    }
}

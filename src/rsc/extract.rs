//! Typed field extraction conventions
//!
//! Every handler turns raw tokens into typed fields through this module, so
//! downstream summaries can treat fields uniformly:
//!
//! - booleans never fail: anything that is not `yes`/`true`/`1` is `false`;
//! - integers keep the raw string on failure, no derived field is set;
//! - durations degrade to 0 seconds;
//! - IP/network values keep the raw string and set a validity flag instead
//!   of raising.

use std::net::{Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rsc::model::Command;

static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?:/(\d{1,2}))?").expect("valid ip pattern")
});

static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)w)?(?:(\d+)d)?(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?")
        .expect("valid duration pattern")
});

// Anchored at the start only; trailing garbage passes, as the original
// firmware's own matcher accepts.
static MAC_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}").expect("valid mac pattern")
});

static INTERFACE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ether|wlan|bridge|vlan|bonding|pppoe|l2tp|sstp|ovpn|eoip|gre|ipip|6to4|lte)[\d.-]+")
        .expect("valid interface pattern")
});

static BANDWIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*([kKmMgG])?").expect("valid bandwidth pattern"));

/// Boolean convention: `yes`/`true`/`1` (case-insensitive) and nothing else.
pub fn parse_bool(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "yes" | "true" | "1")
}

pub fn parse_int(value: &str) -> Option<i64> {
    value.parse().ok()
}

/// `[Nw][Nd][Nh][Nm][Ns]` to total seconds; unparseable or empty input is 0.
/// The counts come from untrusted text, so the total saturates rather than
/// overflowing.
pub fn parse_duration_seconds(value: &str) -> u64 {
    let caps = match DURATION.captures(value) {
        Some(caps) => caps,
        None => return 0,
    };
    let unit = |idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    [(1, 604_800), (2, 86_400), (3, 3_600), (4, 60), (5, 1)]
        .into_iter()
        .fold(0u64, |total, (idx, scale)| {
            total.saturating_add(unit(idx).saturating_mul(scale))
        })
}

/// `parse_duration_seconds` clamped into `i64` for parameter storage.
pub fn parse_duration_seconds_i64(value: &str) -> i64 {
    i64::try_from(parse_duration_seconds(value)).unwrap_or(i64::MAX)
}

/// A validated `address[/prefix]` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpNetwork {
    pub address: Ipv4Addr,
    pub network: Ipv4Addr,
    pub prefix: u8,
}

impl IpNetwork {
    pub fn is_private(&self) -> bool {
        is_private_ip(self.address)
    }
}

/// Extract address, network address and prefix length from `a.b.c.d[/n]`.
/// Prefix defaults to 32 when absent.
pub fn extract_ip_network(value: &str) -> Option<IpNetwork> {
    let caps = IP_ADDRESS.captures(value)?;
    let address: Ipv4Addr = caps[1].parse().ok()?;
    let prefix: u8 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 32,
    };
    if prefix > 32 {
        return None;
    }

    let mask: u32 = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    };
    let network = Ipv4Addr::from(u32::from(address) & mask);

    Some(IpNetwork {
        address,
        network,
        prefix,
    })
}

/// Private/public classification. RFC1918 ranges plus loopback and
/// link-local count as private.
pub fn is_private_ip(address: Ipv4Addr) -> bool {
    address.is_private() || address.is_loopback() || address.is_link_local()
}

/// A validated IPv6 `address[/prefix]` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ip6Network {
    pub address: Ipv6Addr,
    pub network: Ipv6Addr,
    pub prefix: u8,
}

impl Ip6Network {
    pub fn is_private(&self) -> bool {
        is_private_ip6(self.address)
    }
}

/// Extract address, network address and prefix length from an IPv6
/// `addr[/n]`. Prefix defaults to 128 when absent.
pub fn extract_ip6_network(value: &str) -> Option<Ip6Network> {
    let (addr, prefix) = match value.split_once('/') {
        Some((addr, prefix)) => (addr, prefix.parse::<u8>().ok()?),
        None => (value, 128),
    };
    if prefix > 128 {
        return None;
    }
    let address: Ipv6Addr = addr.parse().ok()?;

    let mask: u128 = if prefix == 0 {
        0
    } else {
        u128::MAX << (128 - u32::from(prefix))
    };
    let network = Ipv6Addr::from(u128::from(address) & mask);

    Some(Ip6Network {
        address,
        network,
        prefix,
    })
}

pub fn is_link_local_ip6(address: Ipv6Addr) -> bool {
    (address.segments()[0] & 0xffc0) == 0xfe80
}

/// Private/public classification for IPv6: unique-local (fc00::/7),
/// link-local and loopback count as private.
pub fn is_private_ip6(address: Ipv6Addr) -> bool {
    address.is_loopback()
        || (address.segments()[0] & 0xfe00) == 0xfc00
        || is_link_local_ip6(address)
}

/// Split a comma-delimited list, trimming whitespace and dropping empties.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Expand a port specification (`80`, `80-443`, `80,443,8080`) into the
/// individual ports. Invalid pieces are skipped.
pub fn parse_port_range(spec: &str) -> Vec<u16> {
    let mut ports = Vec::new();
    if spec.contains(',') {
        for part in spec.split(',') {
            ports.extend(parse_port_range(part.trim()));
        }
    } else if let Some((start, end)) = spec.split_once('-') {
        if let (Ok(start), Ok(end)) = (start.parse::<u16>(), end.parse::<u16>()) {
            ports.extend(start..=end);
        }
    } else if let Ok(port) = spec.parse::<u16>() {
        ports.push(port);
    }
    ports
}

/// Bandwidth like `10M`, `1G`, `100k` to bits per second.
pub fn parse_bandwidth(value: &str) -> Option<u64> {
    let caps = BANDWIDTH.captures(value)?;
    let amount: f64 = caps[1].parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("k") | Some("K") => 1_000.0,
        Some("m") | Some("M") => 1_000_000.0,
        Some("g") | Some("G") => 1_000_000_000.0,
        _ => 1.0,
    };
    Some((amount * multiplier) as u64)
}

pub fn is_valid_mac(value: &str) -> bool {
    MAC_ADDRESS.is_match(value)
}

pub fn is_valid_vlan_id(id: i64) -> bool {
    (1..=4094).contains(&id)
}

/// Interface type detected from a reference like `ether1` or `bridge=BR1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRef {
    pub kind: String,
    pub name: String,
}

pub fn parse_interface_reference(value: &str) -> InterfaceRef {
    if let Some((kind, name)) = value.split_once('=') {
        return InterfaceRef {
            kind: kind.to_string(),
            name: name.to_string(),
        };
    }
    let kind = match INTERFACE_NAME.captures(value) {
        Some(caps) => caps[1].to_string(),
        None => "unknown".to_string(),
    };
    InterfaceRef {
        kind,
        name: value.to_string(),
    }
}

/// Classification of a firewall rule action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirewallAction {
    pub kind: &'static str,
    pub description: &'static str,
}

pub fn classify_firewall_action(action: &str) -> FirewallAction {
    match action.to_ascii_lowercase().as_str() {
        "accept" => FirewallAction {
            kind: "allow",
            description: "Allow packet",
        },
        "drop" => FirewallAction {
            kind: "deny",
            description: "Silently drop packet",
        },
        "reject" => FirewallAction {
            kind: "deny",
            description: "Reject packet with ICMP",
        },
        "log" => FirewallAction {
            kind: "log",
            description: "Log packet",
        },
        "passthrough" => FirewallAction {
            kind: "modify",
            description: "Continue processing",
        },
        "fasttrack-connection" => FirewallAction {
            kind: "optimize",
            description: "Fast track connection",
        },
        "tarpit" => FirewallAction {
            kind: "mitigation",
            description: "Slow down connection",
        },
        _ => FirewallAction {
            kind: "unknown",
            description: "Unknown action",
        },
    }
}

/// Replace a string parameter with its boolean reading. Missing keys and
/// non-string values are left alone.
pub fn coerce_bool(command: &mut Command, key: &str) {
    if let Some(value) = command.str_param(key).map(parse_bool) {
        command.insert(key, value);
    }
}

/// Replace a string parameter with its integer reading; on failure the raw
/// string stays and no derived field is set.
pub fn coerce_int(command: &mut Command, key: &str) {
    if let Some(value) = command.str_param(key).and_then(parse_int) {
        command.insert(key, value);
    }
}

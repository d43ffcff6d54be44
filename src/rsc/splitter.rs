//! Section splitting & hierarchical path resolution
//!
//! A section header's depth is not self-describing: `/interface` may open a
//! 1-level section, `/interface bridge` a 2-level one, or
//! `/interface bridge port` a 3-level one, and the only signal is whether
//! the candidate path belongs to the known vocabulary. Resolution is
//! longest-match-first: test the 3-level candidate, then the 2-level one,
//! then fall back to the root alone with the remaining text treated as the
//! section's first command.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Bucket for commands that appear before any section header.
pub const GLOBAL_SECTION: &str = "_global";

/// Fixed vocabulary of multi-token section paths. Used only to disambiguate
/// path depth during splitting; never mutated at runtime.
pub const KNOWN_SECTIONS: &[&str] = &[
    "/interface bridge port",
    "/interface bridge vlan",
    "/interface bridge settings",
    "/interface vlan",
    "/interface bonding",
    "/interface ethernet",
    "/interface wireless",
    "/interface eoip",
    "/interface gre",
    "/interface ipip",
    "/interface 6to4",
    "/interface lte",
    "/interface pppoe-client",
    "/interface pppoe-server",
    "/interface l2tp-client",
    "/interface l2tp-server",
    "/interface sstp-client",
    "/interface sstp-server",
    "/interface ovpn-client",
    "/interface ovpn-server",
    "/interface pptp-client",
    "/interface pptp-server",
    "/interface vrrp",
    "/interface list member",
    "/interface wireless security-profiles",
    "/ip address",
    "/ip route",
    "/ip firewall filter",
    "/ip firewall nat",
    "/ip firewall mangle",
    "/ip firewall raw",
    "/ip firewall address-list",
    "/ip firewall layer7-protocol",
    "/ip firewall service-port",
    "/ip dhcp-client",
    "/ip dhcp-server",
    "/ip dhcp-server network",
    "/ip dhcp-server lease",
    "/ip dhcp-relay",
    "/ip dns",
    "/ip pool",
    "/ip service",
    "/ip arp",
    "/ip neighbor",
    "/ip settings",
    "/ipv6 address",
    "/ipv6 route",
    "/ipv6 firewall filter",
    "/ipv6 firewall address-list",
    "/system identity",
    "/system clock",
    "/system note",
    "/system routerboard settings",
    "/routing ospf instance",
    "/routing ospf area",
    "/routing ospf interface",
    "/routing bgp instance",
    "/routing bgp peer",
    "/routing filter",
    "/queue simple",
    "/queue tree",
    "/queue type",
    "/tool bandwidth-server",
    "/tool mac-server",
    "/tool mac-server mac-winbox",
    "/snmp community",
    "/ppp secret",
    "/ppp profile",
    "/ppp aaa",
    "/caps-man manager",
    "/caps-man datapath",
    "/caps-man security",
    "/caps-man configuration",
    "/caps-man channel",
    "/caps-man interface",
    "/caps-man provisioning",
    "/mpls",
    "/mpls ldp",
    "/mpls interface",
    "/mpls forwarding-table",
    "/password",
    "/import",
    "/export",
    "/console",
    "/file",
    "/port",
    "/radius",
    "/special-login",
    "/partitions",
];

static KNOWN: Lazy<HashSet<&'static str>> =
    Lazy::new(|| KNOWN_SECTIONS.iter().copied().collect());

// Sub-path components are lowercase-hyphen words only. `/interface 6to4`
// therefore never resolves as a 2-level section even though it is in the
// vocabulary; the digit fails the token pattern.
static TWO_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z-]+)\s+([a-z-]+)(?:\s|$)").expect("valid sub-path pattern")
});
static ONE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z-]+)(?:\s|$)").expect("valid sub-path pattern"));

pub fn is_known_section(path: &str) -> bool {
    KNOWN.contains(path)
}

/// Resolve a section header line into `(path, leftover)`.
///
/// `leftover` is any command text on the same line after the resolved path;
/// empty when the line declared only the path.
pub fn resolve_header(line: &str) -> (String, String) {
    let (root, remaining) = match line.split_once(char::is_whitespace) {
        Some((root, rest)) => (root, rest.trim_start()),
        None => return (line.to_string(), String::new()),
    };
    if remaining.is_empty() {
        return (root.to_string(), String::new());
    }

    if let Some(caps) = TWO_TOKENS.captures(remaining) {
        let sub1 = &caps[1];
        let sub2 = &caps[2];

        let three_level = format!("{root} {sub1} {sub2}");
        if is_known_section(&three_level) {
            // The original slices assuming exactly one space between the
            // sub-path tokens; keep that, but degrade to an empty leftover
            // instead of slicing out of bounds.
            let consumed = sub1.len() + 1 + sub2.len();
            let leftover = remaining.get(consumed..).map(str::trim).unwrap_or("");
            return (three_level, leftover.to_string());
        }

        let two_level = format!("{root} {sub1}");
        if is_known_section(&two_level) {
            let leftover = remaining.get(sub1.len()..).map(str::trim).unwrap_or("");
            return (two_level, leftover.to_string());
        }

        return (root.to_string(), remaining.to_string());
    }

    if let Some(caps) = ONE_TOKEN.captures(remaining) {
        let sub = &caps[1];
        let two_level = format!("{root} {sub}");
        if is_known_section(&two_level) {
            let leftover = remaining.get(sub.len()..).map(str::trim).unwrap_or("");
            return (two_level, leftover.to_string());
        }
    }

    (root.to_string(), remaining.to_string())
}

/// Group logical lines into sections.
///
/// The cursor starts at [`GLOBAL_SECTION`] and moves whenever a line begins
/// with `/`. Leftover text on a header line becomes that section's first
/// command. Re-entering a path appends to its existing bucket.
pub fn split_sections(lines: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut cursor = GLOBAL_SECTION.to_string();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('/') {
            let (path, leftover) = resolve_header(line);
            cursor = path;
            if !leftover.is_empty() {
                sections.entry(cursor.clone()).or_default().push(leftover);
            }
        } else {
            sections
                .entry(cursor.clone())
                .or_default()
                .push(line.to_string());
        }
    }

    sections
}

/// Read-only variant of [`split_sections`]: resolve every header with the
/// same rules but collect only the sorted set of distinct paths.
pub fn discover(lines: &[String]) -> Vec<String> {
    let mut paths = BTreeSet::new();
    for line in lines {
        let line = line.trim();
        if line.starts_with('/') {
            let (path, _) = resolve_header(line);
            paths.insert(path);
        }
    }
    paths.into_iter().collect()
}

//! Typed section handlers
//!
//! One module per section family. Every handler runs base tokenization
//! first and then applies the shared coercions from [`crate::rsc::extract`];
//! parameter keys a handler does not recognize stay verbatim so unknown
//! vendor options are never lost.

pub mod firewall;
pub mod generic;
pub mod interface;
pub mod ip;
pub mod queue;
pub mod snmp;
pub mod system;

use crate::rsc::model::Summary;
use crate::rsc::registry::HandlerRegistry;

/// Register the default handler for every section family.
///
/// Exact paths mirror the sections RouterOS exports; glob patterns cover
/// the per-protocol tunnel interface variants.
pub fn register_defaults(registry: &mut HandlerRegistry) {
    registry.register("/interface", interface::InterfaceHandler);
    registry.register("/interface bridge", interface::BridgeHandler);
    registry.register("/interface bridge port", interface::BridgePortHandler);
    registry.register("/interface vlan", interface::VlanHandler);
    for path in [
        "/interface ethernet",
        "/interface wireless",
        "/interface bonding",
        "/interface eoip",
        "/interface gre",
        "/interface ipip",
        "/interface 6to4",
        "/interface lte",
    ] {
        registry.register(path, interface::InterfaceHandler);
    }
    for pattern in [
        "/interface pppoe-*",
        "/interface l2tp-*",
        "/interface sstp-*",
        "/interface ovpn-*",
        "/interface pptp-*",
    ] {
        registry.register(pattern, interface::InterfaceHandler);
    }

    for path in [
        "/ip firewall filter",
        "/ip firewall mangle",
        "/ip firewall raw",
    ] {
        registry.register(path, firewall::FirewallRuleHandler);
    }
    registry.register("/ip firewall nat", firewall::FirewallNatHandler);
    registry.register("/ip firewall address-list", firewall::AddressListHandler);

    registry.register("/ip address", ip::IpAddressHandler);
    registry.register("/ip pool", ip::IpAddressHandler);
    registry.register("/ip dhcp-client", ip::IpAddressHandler);
    registry.register("/ip route", ip::IpRouteHandler);

    // The IPv6 sections validate through the IPv6 address family, firewall
    // variants included.
    registry.register("/ipv6 address", ip::Ipv6AddressHandler);
    registry.register("/ipv6 route", ip::Ipv6RouteHandler);
    registry.register("/ipv6 firewall filter", ip::Ipv6AddressHandler);
    registry.register("/ipv6 firewall address-list", ip::Ipv6AddressHandler);
    registry.register("/ip dhcp-server", ip::DhcpServerHandler);
    registry.register("/ip dhcp-server network", ip::DhcpServerHandler);
    registry.register("/ip dns", ip::DnsHandler);
    registry.register("/ip service", ip::ServiceHandler);

    registry.register("/system identity", system::IdentityHandler);
    registry.register("/system clock", system::ClockHandler);
    registry.register("/system note", system::NoteHandler);
    registry.register("/user", system::UserHandler);

    registry.register("/queue simple", queue::QueueHandler);
    registry.register("/queue tree", queue::QueueHandler);

    registry.register("/snmp community", snmp::SnmpCommunityHandler);
}

/// Minimal summary shared by handlers with nothing more to classify.
pub(crate) fn command_count_summary(count: usize) -> Summary {
    let mut summary = Summary::new();
    summary.insert("command_count".into(), count.into());
    summary
}

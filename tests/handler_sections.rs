//! Parameterized coverage of per-section typed coercions
//!
//! Drives representative export lines through the full parse so the
//! splitter, tokenizer and handler dispatch all participate.

use rsc::rsc::Parser;
use rstest::rstest;

fn parse_one(section: &str, line: &str) -> rsc::rsc::Command {
    let export = format!("{section}\n{line}\n");
    let config = Parser::with_defaults().parse(&export, None);
    assert!(config.errors.is_empty(), "unexpected errors: {:?}", config.errors);
    config.section(section).expect("section parsed").commands[0].clone()
}

#[rstest]
#[case("/ip firewall filter", "add chain=input action=accept", "action_type", "allow")]
#[case("/ip firewall filter", "add chain=input action=drop", "action_type", "deny")]
#[case("/ip firewall filter", "add chain=input action=reject", "action_type", "deny")]
#[case("/ip firewall filter", "add chain=input action=tarpit", "action_type", "mitigation")]
#[case("/ip firewall mangle", "add chain=prerouting action=passthrough", "action_type", "modify")]
#[case("/ip firewall filter", "add chain=forward action=fasttrack-connection", "action_type", "optimize")]
#[case("/ip firewall filter", "add chain=input action=mystery", "action_type", "unknown")]
fn firewall_action_classification(
    #[case] section: &str,
    #[case] line: &str,
    #[case] key: &str,
    #[case] expected: &str,
) {
    let command = parse_one(section, line);
    assert_eq!(command.str_param(key), Some(expected));
}

#[rstest]
#[case("add chain=srcnat action=masquerade", "source_nat")]
#[case("add chain=dstnat action=dst-nat to-addresses=10.0.0.5", "destination_nat")]
#[case("add chain=output action=accept", "unknown")]
fn nat_type_follows_chain(#[case] line: &str, #[case] expected: &str) {
    let command = parse_one("/ip firewall nat", line);
    assert_eq!(command.str_param("nat_type"), Some(expected));
}

#[rstest]
#[case("add name=lan interface=ether2 vlan-id=100", Some(100), false)]
#[case("add name=bad interface=ether2 vlan-id=5000", Some(5000), true)]
#[case("add name=worse interface=ether2 vlan-id=abc", None, true)]
fn vlan_id_validation(
    #[case] line: &str,
    #[case] expected_id: Option<i64>,
    #[case] invalid: bool,
) {
    let command = parse_one("/interface vlan", line);
    assert_eq!(command.int_param("vlan-id"), expected_id);
    assert_eq!(command.bool_param("vlan_id_invalid").unwrap_or(false), invalid);
}

#[rstest]
#[case("add address=10.1.2.3/16 interface=ether1", "10.1.0.0", 16, true)]
#[case("add address=203.0.113.9 interface=ether1", "203.0.113.9", 32, false)]
fn ip_address_decomposition(
    #[case] line: &str,
    #[case] network: &str,
    #[case] prefix: i64,
    #[case] private: bool,
) {
    let command = parse_one("/ip address", line);
    assert_eq!(command.str_param("network"), Some(network));
    assert_eq!(command.int_param("prefix"), Some(prefix));
    assert_eq!(command.bool_param("is_private"), Some(private));
}

#[rstest]
#[case("set name=ssh disabled=no", true)]
#[case("set name=telnet disabled=yes", false)]
#[case("set name=winbox", true)]
fn service_enabled_derives_from_disabled(#[case] line: &str, #[case] enabled: bool) {
    let command = parse_one("/ip service", line);
    assert_eq!(command.bool_param("enabled"), Some(enabled));
}

#[rstest]
#[case("/interface pppoe-client", "add name=pppoe-out1 interface=ether1")]
#[case("/interface pptp-client", "add name=pptp-out1 connect-to=203.0.113.1")]
#[case("/interface ovpn-client", "add name=ovpn-out1 connect-to=203.0.113.1")]
fn tunnel_variants_dispatch_through_glob_patterns(#[case] section: &str, #[case] line: &str) {
    let export = format!("{section}\n{line}\n");
    let config = Parser::with_defaults().parse(&export, None);
    let summary = config.section(section).expect("section parsed").summarize();
    // The interface handler is the one that emits this grouping.
    assert!(summary.contains_key("interfaces_by_type"));
}

#[rstest]
#[case("add name=admin group=full", "admin")]
#[case("add name=ops group=write", "user")]
#[case("add name=audit group=custom-ro", "custom")]
fn user_privilege_levels(#[case] line: &str, #[case] level: &str) {
    let command = parse_one("/user", line);
    assert_eq!(command.str_param("privilege_level"), Some(level));
}

#[rstest]
#[case("add list=lan address=192.168.0.0/16", true, true)]
#[case("add list=wan address=198.51.100.0/24", true, false)]
#[case("add list=bad address=nonsense", false, false)]
fn address_list_validity_and_privacy(
    #[case] line: &str,
    #[case] valid: bool,
    #[case] private: bool,
) {
    let command = parse_one("/ip firewall address-list", line);
    assert_eq!(command.bool_param("address_valid"), Some(valid));
    assert_eq!(command.bool_param("is_private").unwrap_or(false), private);
}

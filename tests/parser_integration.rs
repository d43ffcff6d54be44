//! End-to-end tests over complete RouterOS exports
//!
//! Each test feeds a full export string through `Parser::parse` and checks
//! the resulting sections, derived fields and summaries.

use std::sync::Arc;

use rsc::rsc::{discover_sections, HandlerRegistry, Parser};

const SMALL_EXPORT: &str = "\
# aug/27/2026 10:12:33 by RouterOS 7.15
/system identity
set name=test-router
/ip address
add address=192.168.1.1/24 interface=ether1 network=192.168.1.0
";

#[test]
fn small_export_parses_without_errors() {
    let parser = Parser::with_defaults();
    let config = parser.parse(SMALL_EXPORT, None);

    assert!(config.errors.is_empty());
    assert_eq!(config.sections.len(), 2);
    assert_eq!(config.identity(), Some("test-router"));

    let section = config.section("/ip address").unwrap();
    assert_eq!(section.commands.len(), 1);
    let command = &section.commands[0];
    assert_eq!(command.str_param("ip"), Some("192.168.1.1"));
    assert_eq!(command.str_param("network"), Some("192.168.1.0"));
    assert_eq!(command.int_param("prefix"), Some(24));
    assert_eq!(command.bool_param("is_private"), Some(true));
}

#[test]
fn comment_lines_are_dropped_entirely() {
    let parser = Parser::with_defaults();
    let config = parser.parse(
        "# header comment\n/system identity\n# section comment\nset name=router\n",
        None,
    );
    let section = config.section("/system identity").unwrap();
    assert_eq!(section.commands.len(), 1);
}

#[test]
fn continuation_lines_join_before_splitting() {
    let parser = Parser::with_defaults();
    let config = parser.parse(
        "/ip firewall filter\nadd chain=input \\\n    action=accept protocol=tcp\n",
        None,
    );
    let section = config.section("/ip firewall filter").unwrap();
    let command = &section.commands[0];
    assert_eq!(command.str_param("chain"), Some("input"));
    assert_eq!(command.str_param("action"), Some("accept"));
    assert_eq!(command.str_param("action_type"), Some("allow"));
}

#[test]
fn three_level_section_header_resolves() {
    let config = Parser::with_defaults().parse(
        "/ip firewall filter\nadd chain=input action=drop\n/ip dhcp-server network\nadd address=10.0.0.0/24 gateway=10.0.0.1\n",
        None,
    );
    assert!(config.section("/ip firewall filter").is_some());
    assert!(config.section("/ip dhcp-server network").is_some());
}

#[test]
fn lines_before_any_header_go_to_the_global_bucket() {
    let config = Parser::with_defaults().parse(":delay 5\n/system identity\nset name=r1\n", None);
    let global = config.section("_global").unwrap();
    assert_eq!(global.commands.len(), 1);
    assert_eq!(global.commands[0].raw, ":delay 5");
    assert!(global.commands[0].params.is_empty());
}

#[test]
fn handler_failure_isolates_to_its_section() {
    struct FailingHandler;

    impl rsc::rsc::SectionHandler for FailingHandler {
        fn parse_command(&self, _line: &str) -> rsc::rsc::HandlerResult<rsc::rsc::Command> {
            Err(rsc::rsc::HandlerError::new("broken handler"))
        }

        fn summarize(&self, _commands: &[rsc::rsc::Command]) -> rsc::rsc::Summary {
            rsc::rsc::Summary::new()
        }
    }

    let mut registry = HandlerRegistry::with_defaults();
    registry.register("/system clock", FailingHandler);
    let parser = Parser::new(Arc::new(registry));

    let config = parser.parse(
        "/system clock\nset time-zone-name=UTC\n/system identity\nset name=survivor\n",
        None,
    );

    assert_eq!(config.errors.len(), 1);
    assert_eq!(config.errors[0].section, "/system clock");
    assert_eq!(config.errors[0].message, "broken handler");
    assert_eq!(config.errors[0].line_count, 1);
    assert!(config.section("/system clock").is_none());
    assert_eq!(config.identity(), Some("survivor"));
}

#[test]
fn device_summary_reports_sections_and_errors() {
    let config = Parser::with_defaults().parse(SMALL_EXPORT, None);
    let summary = config.device_summary();

    assert_eq!(summary["device_name"], "test-router");
    assert_eq!(summary["sections_parsed"], 2);
    assert_eq!(summary["parsing_errors"], 0);
    assert_eq!(
        summary["section_list"],
        serde_json::json!(["/ip address", "/system identity"])
    );
    assert_eq!(
        summary["section_summaries"]["/ip address"]["address_count"],
        1
    );
    assert!(summary.get("errors").is_none());
}

#[test]
fn discover_sections_is_sorted_and_distinct() {
    let paths = discover_sections(SMALL_EXPORT);
    assert_eq!(paths, vec!["/ip address", "/system identity"]);
}

#[test]
fn reentered_sections_merge_in_order() {
    let config = Parser::with_defaults().parse(
        "/ip address\nadd address=10.0.0.1/24 interface=ether1\n/system identity\nset name=r1\n/ip address\nadd address=10.0.1.1/24 interface=ether2\n",
        None,
    );
    let section = config.section("/ip address").unwrap();
    assert_eq!(section.commands.len(), 2);
    assert_eq!(section.commands[0].str_param("ip"), Some("10.0.0.1"));
    assert_eq!(section.commands[1].str_param("ip"), Some("10.0.1.1"));
}

#[test]
fn quoted_values_survive_an_entire_parse() {
    let config = Parser::with_defaults().parse(
        "/ip firewall filter\nadd chain=input action=accept comment=\"allow established = ok\"\n",
        None,
    );
    let command = &config.section("/ip firewall filter").unwrap().commands[0];
    assert_eq!(command.str_param("comment"), Some("allow established = ok"));
    assert_eq!(command.bool_param("has_comment"), Some(true));
}

#[test]
fn ipv6_sections_validate_ipv6_values() {
    let config = Parser::with_defaults().parse(
        "/ipv6 address\nadd address=2001:db8::1/64 interface=ether1\n/ipv6 route\nadd dst-address=::/0 gateway=fe80::1\n",
        None,
    );
    assert!(config.errors.is_empty());

    let address = &config.section("/ipv6 address").unwrap().commands[0];
    assert_eq!(address.bool_param("ipv6_valid"), Some(true));
    assert_eq!(address.str_param("ipv6_network"), Some("2001:db8::"));
    assert_eq!(address.int_param("ipv6_prefix"), Some(64));

    let route = &config.section("/ipv6 route").unwrap().commands[0];
    assert_eq!(route.bool_param("is_default_route"), Some(true));
    assert_eq!(route.str_param("gateway_type"), Some("ipv6"));
}

#[test]
fn oversized_numeric_values_do_not_abort_the_parse() {
    let config = Parser::with_defaults().parse(
        "/queue simple\nadd name=huge target=10.0.0.0/24 max-limit=99999999999G/99999999999G\n/ip firewall address-list\nadd list=l address=10.0.0.1 timeout=30516365421847w\n",
        None,
    );
    assert!(config.errors.is_empty());
    let queue = &config.section("/queue simple").unwrap().commands[0];
    assert_eq!(queue.int_param("total_limit_bps"), Some(i64::MAX));
    let entry = &config.section("/ip firewall address-list").unwrap().commands[0];
    assert_eq!(entry.int_param("timeout_seconds"), Some(i64::MAX));
}

#[test]
fn parsing_twice_yields_equal_configurations() {
    let parser = Parser::with_defaults();
    let first = parser.parse(SMALL_EXPORT, Some("router-01"));
    let second = parser.parse(SMALL_EXPORT, Some("router-01"));
    assert_eq!(first, second);
}

#[test]
fn serialization_round_trips_to_json() {
    let config = Parser::with_defaults().parse(SMALL_EXPORT, None);
    let json = config.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["device_name"], serde_json::Value::Null);
    assert_eq!(
        value["sections"]["/system identity"]["commands"][0]["params"]["name"],
        "test-router"
    );
}

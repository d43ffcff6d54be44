//! Queue handlers for `/queue simple` and `/queue tree`

use crate::rsc::error::HandlerResult;
use crate::rsc::extract::{extract_ip_network, is_private_ip, parse_bandwidth, parse_int};
use crate::rsc::model::{Command, Summary};
use crate::rsc::registry::SectionHandler;
use crate::rsc::tokenize::parse_command_line;

/// Split an `upload/download` pair into bits-per-second values.
fn parse_limit_pair(value: &str) -> Option<(u64, u64)> {
    let (up, down) = value.split_once('/')?;
    Some((parse_bandwidth(up)?, parse_bandwidth(down)?))
}

/// Exported rates can exceed any sane value; clamp instead of wrapping.
fn clamp_bps(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub struct QueueHandler;

impl SectionHandler for QueueHandler {
    fn parse_command(&self, line: &str) -> HandlerResult<Command> {
        let mut command = parse_command_line(line);

        if let Some(name) = command.str_param("name").map(str::to_string) {
            command.insert("queue_name", name);
        }

        if let Some(target) = command.str_param("target").map(str::to_string) {
            if let Some(net) = extract_ip_network(&target) {
                command.insert("target_type", "network");
                command.insert("target_network", net.network.to_string());
                command.insert("target_prefix", i64::from(net.prefix));
                command.insert("target_is_private", net.is_private());
            } else if target.contains('.') && !target.contains('/') {
                // Dotted but unparsed as a network: treat as a bare host.
                command.insert("target_type", "ip");
                if let Ok(address) = target.parse() {
                    command.insert("target_is_private", is_private_ip(address));
                }
            } else {
                command.insert("target_type", "interface");
            }
        }

        if let Some(value) = command.str_param("max-limit").map(str::to_string) {
            if let Some((up, down)) = parse_limit_pair(&value) {
                command.insert("upload_limit_bps", clamp_bps(up));
                command.insert("download_limit_bps", clamp_bps(down));
                command.insert("total_limit_bps", clamp_bps(up.saturating_add(down)));
            }
        }
        if let Some(value) = command.str_param("limit-at").map(str::to_string) {
            if let Some((up, down)) = parse_limit_pair(&value) {
                command.insert("upload_guaranteed_bps", clamp_bps(up));
                command.insert("download_guaranteed_bps", clamp_bps(down));
            }
        }

        if let Some(value) = command.str_param("priority").map(str::to_string) {
            if let Some(priority) = parse_int(&value) {
                command.insert("priority_level", priority);
                command.insert("high_priority", priority <= 3);
                command.insert("low_priority", priority >= 6);
            }
        }

        if let Some(value) = command.str_param("queue").map(str::to_string) {
            match value.split_once('/') {
                Some((up, down)) => {
                    command.insert("upload_queue_type", up);
                    command.insert("download_queue_type", down);
                }
                None => command.insert("queue_type", value),
            }
        }

        Ok(command)
    }

    fn summarize(&self, commands: &[Command]) -> Summary {
        let total = commands
            .iter()
            .filter_map(|c| c.int_param("total_limit_bps"))
            .fold(0i64, i64::saturating_add);

        let mut summary = Summary::new();
        summary.insert("command_count".into(), commands.len().into());
        summary.insert("total_limit_bps".into(), total.into());
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_target_with_limits() {
        let command = QueueHandler
            .parse_command("add name=office target=192.168.10.0/24 max-limit=10M/50M")
            .unwrap();
        assert_eq!(command.str_param("queue_name"), Some("office"));
        assert_eq!(command.str_param("target_type"), Some("network"));
        assert_eq!(command.str_param("target_network"), Some("192.168.10.0"));
        assert_eq!(command.int_param("target_prefix"), Some(24));
        assert_eq!(command.int_param("upload_limit_bps"), Some(10_000_000));
        assert_eq!(command.int_param("download_limit_bps"), Some(50_000_000));
        assert_eq!(command.int_param("total_limit_bps"), Some(60_000_000));
    }

    #[test]
    fn interface_target() {
        let command = QueueHandler
            .parse_command("add name=uplink target=ether1 max-limit=1G/1G")
            .unwrap();
        assert_eq!(command.str_param("target_type"), Some("interface"));
    }

    #[test]
    fn priority_classification() {
        let command = QueueHandler
            .parse_command("add name=voip target=10.0.0.0/24 priority=1")
            .unwrap();
        assert_eq!(command.int_param("priority_level"), Some(1));
        assert_eq!(command.bool_param("high_priority"), Some(true));
        assert_eq!(command.bool_param("low_priority"), Some(false));
    }

    #[test]
    fn queue_type_pair_splits() {
        let command = QueueHandler
            .parse_command("add name=bulk target=10.0.0.0/24 queue=pcq-upload/pcq-download")
            .unwrap();
        assert_eq!(command.str_param("upload_queue_type"), Some("pcq-upload"));
        assert_eq!(
            command.str_param("download_queue_type"),
            Some("pcq-download")
        );
        assert!(command.get("queue_type").is_none());
    }

    #[test]
    fn oversized_limits_clamp_instead_of_wrapping() {
        let command = QueueHandler
            .parse_command(
                "add name=huge target=10.0.0.0/24 max-limit=99999999999G/99999999999G",
            )
            .unwrap();
        assert_eq!(command.int_param("upload_limit_bps"), Some(i64::MAX));
        assert_eq!(command.int_param("download_limit_bps"), Some(i64::MAX));
        assert_eq!(command.int_param("total_limit_bps"), Some(i64::MAX));
    }

    #[test]
    fn summary_totals_configured_limits() {
        let commands = vec![
            QueueHandler
                .parse_command("add name=a target=10.0.0.0/24 max-limit=10M/10M")
                .unwrap(),
            QueueHandler
                .parse_command("add name=b target=10.0.1.0/24 max-limit=5M/5M")
                .unwrap(),
        ];
        let summary = QueueHandler.summarize(&commands);
        assert_eq!(summary["command_count"], 2);
        assert_eq!(summary["total_limit_bps"], 30_000_000);
    }

    #[test]
    fn guaranteed_limits() {
        let command = QueueHandler
            .parse_command("add name=office target=10.1.0.0/16 limit-at=2M/8M")
            .unwrap();
        assert_eq!(command.int_param("upload_guaranteed_bps"), Some(2_000_000));
        assert_eq!(command.int_param("download_guaranteed_bps"), Some(8_000_000));
    }
}

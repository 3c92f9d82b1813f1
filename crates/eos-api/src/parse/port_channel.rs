//! Port-channel membership, LACP mode and min-links.

use std::collections::BTreeMap;

use super::interface_order;
use crate::error::Error;
use crate::models::PortChannelMode;

const GROUP_DELIMITER: &str = "Port Channel ";
const INACTIVE_MARKER: &str = "inactive ports";
/// Marker line, column header, dashed rule.
const INACTIVE_HEADER_LINES: usize = 3;

/// Parse `show etherchannel detailed` into channel name → member ports.
///
/// Members are the union of the active and the configured-but-inactive
/// sections, in interface order.
pub fn port_channel_detail(text: &str) -> Result<BTreeMap<String, Vec<String>>, Error> {
    let mut channels = BTreeMap::new();

    for group in text.split(GROUP_DELIMITER).skip(1) {
        let Some(caps) = regex!(r"(?:Port Channel )?(Port-Channel\d+)").captures(group) else {
            return Err(Error::parse(
                "could not find port-channel name in etherchannel detail",
                group,
            ));
        };
        let lines: Vec<&str> = group.lines().collect();

        let mut ports = active_ports(&lines);
        ports.extend(inactive_ports(&lines));
        ports.sort_by(|a, b| interface_order(a, b));
        ports.dedup();

        channels.insert(caps[1].to_owned(), ports);
    }

    Ok(channels)
}

fn active_ports(lines: &[&str]) -> Vec<String> {
    let Some(marker) = lines.iter().position(|l| l.contains("Active Ports")) else {
        return Vec::new();
    };
    let rows = lines.iter().skip(marker + 1);
    let mut rows = rows.skip_while(|l| !l.trim_start().starts_with('-'));
    // consume the dashed rule itself
    rows.next();
    member_rows(rows)
}

fn inactive_ports(lines: &[&str]) -> Vec<String> {
    let Some(marker) = lines
        .iter()
        .position(|l| l.to_ascii_lowercase().contains(INACTIVE_MARKER))
    else {
        return Vec::new();
    };
    member_rows(lines.iter().skip(marker + INACTIVE_HEADER_LINES))
}

fn member_rows<'a>(rows: impl Iterator<Item = &'a &'a str>) -> Vec<String> {
    rows.take_while(|l| !l.trim().is_empty() && !l.trim_end().ends_with(':'))
        .filter_map(|l| l.split_whitespace().next())
        .map(str::to_owned)
        .collect()
}

/// Parse `show port-channel summary` into channel name → LACP mode.
pub fn port_channel_modes(text: &str) -> Result<BTreeMap<String, PortChannelMode>, Error> {
    let mut modes = BTreeMap::new();

    for line in text.lines() {
        let Some(caps) = regex!(r"^\s*Po(\d+)\S*\s+(\S+)").captures(line) else {
            continue;
        };
        let name = format!("Port-Channel{}", &caps[1]);
        let protocol = &caps[2];

        let mode = if protocol == "Static" {
            PortChannelMode::Disabled
        } else if let Some(flags) = regex!(r"^LACP\(([^)]*)\)").captures(protocol) {
            match (flags[1].contains('a'), flags[1].contains('p')) {
                (true, false) => PortChannelMode::Active,
                (false, true) => PortChannelMode::Passive,
                _ => {
                    return Err(Error::parse(
                        format!("ambiguous LACP flags '{}' for {name}", &flags[1]),
                        line,
                    ));
                }
            }
        } else {
            return Err(Error::parse(
                format!("unknown port-channel protocol '{protocol}' for {name}"),
                line,
            ));
        };

        modes.insert(name, mode);
    }

    Ok(modes)
}

/// Parse `min-links` out of `show running-config interfaces <name>`.
/// Absent means the EOS default of 0.
pub fn min_links(text: &str) -> u32 {
    regex!(r"min-links\s+(\d+)")
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DETAIL: &str = "\
Port Channel Port-Channel3 (Fallback State: Unconfigured):
Minimum links: unconfigured
Minimum bandwidth: 0.00 bps
Fallback: Unconfigured
Fallback timeout: 90
  Active Ports:
       Port            Time Became Active       Protocol    Mode         Weight    State
    --------------- ------------------------ -------------- ------------ ------------ -----
       Ethernet2       15:33:41                 LACP        Passive      1         Rx,Tx
       Ethernet1       15:33:41                 LACP        Passive      1         Rx,Tx

Port Channel Port-Channel4:
Minimum links: 2
  Active Ports:
       Port            Time Became Active       Protocol    Mode         Weight    State
    --------------- ------------------------ -------------- ------------ ------------ -----
       Ethernet10      15:33:41                 LACP        Active       1         Rx,Tx

  Configured, but inactive ports:
       Port            Time Became Inactive     Reason Unconfigured
    ------------------ ------------------------ ---------------------
       Ethernet4       Always                   not compatible with aggregate
       Ethernet3       Always                   waiting for LACP response

Port Channel Port-Channel9:
Minimum links: unconfigured
  Configured, but inactive ports:
       Port            Time Became Inactive     Reason Unconfigured
    ------------------ ------------------------ ---------------------
       Ethernet7       Always                   link down
";

    const SUMMARY: &str = "\
                 Flags
------------------------ ---------------------------- -------------------------
  a - LACP Active          p - LACP Passive           * - static fallback
  F - Fallback enabled     f - Fallback configured    ^ - individual fallback
  U - In Use               D - Down
  + - In-Sync              - - Out-of-Sync            i - incompatible with agg
  P - bundled in Po        s - suspended              G - Aggregable
  I - Individual           S - ShortTimeout           w - wait for agg

Number of channels in use: 3
Number of aggregators: 3

   Port-Channel       Protocol    Ports
------------------ -------------- ------------------
   Po3(U)             LACP(p)     Et1(PG+) Et2(PG+)
   Po4(D)             LACP(a)     Et3(G-) Et4(G-) Et10(PG+)
";

    #[test]
    fn detail_ports_are_sorted_union() {
        let channels = port_channel_detail(DETAIL).unwrap_or_default();
        assert_eq!(channels.len(), 3);
        assert_eq!(channels["Port-Channel3"], vec!["Ethernet1", "Ethernet2"]);
        assert_eq!(
            channels["Port-Channel4"],
            vec!["Ethernet3", "Ethernet4", "Ethernet10"]
        );
        assert_eq!(channels["Port-Channel9"], vec!["Ethernet7"]);
    }

    #[test]
    fn detail_without_any_sections_is_empty() {
        let text = "Port Channel Port-Channel5:\nMinimum links: unconfigured\n";
        let channels = port_channel_detail(text).unwrap_or_default();
        assert_eq!(channels.get("Port-Channel5"), Some(&Vec::new()));
    }

    #[test]
    fn detail_of_empty_output_is_empty() {
        assert!(port_channel_detail("").unwrap_or_default().is_empty());
    }

    #[test]
    fn summary_lacp_modes() {
        let modes = port_channel_modes(SUMMARY).unwrap_or_default();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes["Port-Channel3"], PortChannelMode::Passive);
        assert_eq!(modes["Port-Channel4"], PortChannelMode::Active);
    }

    #[test]
    fn summary_static_channel_is_disabled() {
        let text = "   Po9(D)             Static      Et7(D)\n";
        let modes = port_channel_modes(text).unwrap_or_default();
        assert_eq!(modes["Port-Channel9"], PortChannelMode::Disabled);
    }

    #[test]
    fn summary_with_both_flags_fails() {
        let text = "   Po2(U)             LACP(ap)    Et5(PG+)\n";
        assert!(matches!(port_channel_modes(text), Err(Error::Parse { .. })));
    }

    #[test]
    fn min_links_defaults_to_zero() {
        let configured = "interface Port-Channel4\n   description uplink\n   min-links 2\n!\n";
        assert_eq!(min_links(configured), 2);
        assert_eq!(min_links("interface Port-Channel3\n!\n"), 0);
    }
}

// ── Device-to-resource conversions ──
//
// Small mappings between what `show` commands report and the values the
// resource types use. Kept separate so the CLI can reuse them for display.

use crate::error::CoreError;

const MEGA: u64 = 1_000_000;
const GIGA: u64 = 1_000_000_000;

/// Interface bandwidth in bits per second to a speed token.
///
/// `10_000_000` → `10m`, `1_000_000_000` → `1g`, `56_000_000_000` → `56g`.
/// Zero (link down) has no speed.
pub fn bandwidth_to_speed(bandwidth: u64) -> Option<String> {
    if bandwidth == 0 {
        None
    } else if bandwidth % GIGA == 0 {
        Some(format!("{}g", bandwidth / GIGA))
    } else if bandwidth % MEGA == 0 {
        Some(format!("{}m", bandwidth / MEGA))
    } else {
        None
    }
}

/// `duplexFull` → `full`, `duplexHalf` → `half`.
pub fn duplex_to_value(duplex: &str) -> Result<&'static str, CoreError> {
    match duplex {
        "duplexFull" => Ok("full"),
        "duplexHalf" => Ok("half"),
        other => Err(CoreError::Protocol(format!("unknown duplex value '{other}'"))),
    }
}

/// Interface status to the administrative `enable` flag. Only an explicitly
/// `disabled` port is administratively down.
pub fn status_to_enabled(status: &str) -> bool {
    status != "disabled"
}

/// `hostname/auth_port/acct_port` with RADIUS defaults for missing ports.
pub fn split_radius_name(name: &str) -> Result<(String, u16, u16), CoreError> {
    let mut parts = name.split('/');
    let host = parts.next().unwrap_or_default();
    let auth = port_or(parts.next(), eos_api::RadiusServer::DEFAULT_AUTH_PORT, name)?;
    let acct = port_or(parts.next(), eos_api::RadiusServer::DEFAULT_ACCT_PORT, name)?;
    if host.is_empty() || parts.next().is_some() {
        return Err(bad_name(name, "hostname/auth_port/acct_port"));
    }
    Ok((host.to_owned(), auth, acct))
}

/// `hostname/port` with the TACACS+ default for a missing port.
pub fn split_tacacs_name(name: &str) -> Result<(String, u16), CoreError> {
    let mut parts = name.split('/');
    let host = parts.next().unwrap_or_default();
    let port = port_or(parts.next(), eos_api::TacacsServer::DEFAULT_PORT, name)?;
    if host.is_empty() || parts.next().is_some() {
        return Err(bad_name(name, "hostname/port"));
    }
    Ok((host.to_owned(), port))
}

/// SNMP user identity `name:version`; the version defaults to v3.
pub fn split_snmp_user_name(name: &str) -> Result<(String, eos_api::SnmpVersion), CoreError> {
    let (user, version) = match name.split_once(':') {
        Some((user, version)) => (user, version.parse()?),
        None => (name, eos_api::SnmpVersion::V3),
    };
    if user.is_empty() {
        return Err(bad_name(name, "name:version"));
    }
    Ok((user.to_owned(), version))
}

// ── VLAN ranges ─────────────────────────────────────────────────────

const MAX_VLAN: u32 = 4094;

/// Expand EOS range syntax (`1-3,10`, `ALL`, `none`) into sorted VLAN ids.
pub fn vlan_range_to_ids(range: &str) -> Result<Vec<u32>, CoreError> {
    let range = range.trim();
    if range.eq_ignore_ascii_case("all") {
        return Ok((1..=MAX_VLAN).collect());
    }
    if range.is_empty() || range.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    for part in range.split(',') {
        let bad = || CoreError::Protocol(format!("invalid VLAN range '{range}'"));
        match part.trim().split_once('-') {
            Some((lo, hi)) => {
                let lo: u32 = lo.parse().map_err(|_| bad())?;
                let hi: u32 = hi.parse().map_err(|_| bad())?;
                if lo > hi {
                    return Err(bad());
                }
                ids.extend(lo..=hi);
            }
            None => ids.push(part.trim().parse().map_err(|_| bad())?),
        }
    }
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Collapse VLAN ids into EOS range syntax: `[1, 2, 3, 10]` → `1-3,10`.
pub fn ids_to_vlan_range(ids: &[u32]) -> String {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.is_empty() {
        return "none".to_owned();
    }

    let mut parts = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(mut start) = iter.next() else {
        return "none".to_owned();
    };
    let mut end = start;
    for id in iter {
        if id == end + 1 {
            end = id;
            continue;
        }
        parts.push(span(start, end));
        start = id;
        end = id;
    }
    parts.push(span(start, end));
    parts.join(",")
}

fn span(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}

fn port_or(token: Option<&str>, default: u16, name: &str) -> Result<u16, CoreError> {
    match token {
        None | Some("") => Ok(default),
        Some(t) => t
            .parse()
            .map_err(|_| bad_name(name, "a numeric port")),
    }
}

fn bad_name(name: &str, expected: &str) -> CoreError {
    CoreError::ValidationFailed {
        message: format!("server name '{name}' does not match {expected}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_tokens() {
        assert_eq!(bandwidth_to_speed(10_000_000).as_deref(), Some("10m"));
        assert_eq!(bandwidth_to_speed(100_000_000).as_deref(), Some("100m"));
        assert_eq!(bandwidth_to_speed(1_000_000_000).as_deref(), Some("1g"));
        assert_eq!(bandwidth_to_speed(56_000_000_000).as_deref(), Some("56g"));
        assert_eq!(bandwidth_to_speed(0), None);
    }

    #[test]
    fn duplex_values() {
        assert_eq!(duplex_to_value("duplexFull").ok(), Some("full"));
        assert_eq!(duplex_to_value("duplexHalf").ok(), Some("half"));
        assert!(duplex_to_value("duplexUnknown").is_err());
    }

    #[test]
    fn status_values() {
        assert!(status_to_enabled("connected"));
        assert!(status_to_enabled("notconnect"));
        assert!(!status_to_enabled("disabled"));
    }

    #[test]
    fn server_names() {
        assert_eq!(
            split_radius_name("10.1.1.1").ok(),
            Some(("10.1.1.1".to_owned(), 1812, 1813))
        );
        assert_eq!(
            split_radius_name("10.1.1.1/1645/1646").ok(),
            Some(("10.1.1.1".to_owned(), 1645, 1646))
        );
        assert!(split_radius_name("10.1.1.1/x").is_err());
        assert_eq!(
            split_tacacs_name("1.2.3.4/4949").ok(),
            Some(("1.2.3.4".to_owned(), 4949))
        );
        assert!(split_tacacs_name("/49").is_err());

        let (user, version) = split_snmp_user_name("nms:v2c").unwrap();
        assert_eq!((user.as_str(), version), ("nms", eos_api::SnmpVersion::V2));
        let (_, version) = split_snmp_user_name("admin").unwrap();
        assert_eq!(version, eos_api::SnmpVersion::V3);
        assert!(split_snmp_user_name(":v1").is_err());
    }

    #[test]
    fn vlan_ranges() {
        assert_eq!(vlan_range_to_ids("1-3,10").unwrap(), vec![1, 2, 3, 10]);
        assert_eq!(vlan_range_to_ids("ALL").unwrap().len(), 4094);
        assert!(vlan_range_to_ids("none").unwrap().is_empty());
        assert!(vlan_range_to_ids("5-2").is_err());
        assert_eq!(ids_to_vlan_range(&[10, 1, 3, 2, 12, 11]), "1-3,10-12");
        assert_eq!(ids_to_vlan_range(&[7]), "7");
        assert_eq!(ids_to_vlan_range(&[]), "none");
    }
}

//! SNMP agent state, communities, traps, notification receivers and users.

use crate::error::Error;
use crate::models::{
    CommunityGroup, NotificationKind, NotificationReceiver, ReceiverAuth, SnmpCommunity,
    SnmpNotification, SnmpUser, SnmpVersion,
};

/// `show snmp`: whether the agent is running.
pub fn enabled(text: &str) -> Result<bool, Error> {
    if text.contains("SNMP agent disabled:") {
        Ok(false)
    } else if text.contains("SNMP packets input") {
        Ok(true)
    } else {
        Err(Error::parse(
            "could not parse text for SNMP enabled state",
            text,
        ))
    }
}

/// `show snmp community`
pub fn communities(text: &str) -> Result<Vec<SnmpCommunity>, Error> {
    let mut out = Vec::new();

    for block in text.split("\n\n") {
        let mut name = None;
        let mut group = None;
        let mut acl = None;
        let mut seen = false;

        for caps in regex!(r"(?m) (\w+): (\w.*?)(?:\s*\(.*?\)|\n|$)").captures_iter(block) {
            seen = true;
            let value = caps[2].to_owned();
            match &caps[1] {
                "name" => name = Some(value),
                "list" => acl = Some(value),
                "access" => {
                    group = Some(match value.as_str() {
                        "read-write" => CommunityGroup::Rw,
                        "read-only" => CommunityGroup::Ro,
                        other => {
                            return Err(Error::parse(
                                format!("unknown community access '{other}'"),
                                block,
                            ));
                        }
                    });
                }
                _ => {}
            }
        }

        if !seen {
            continue;
        }
        let Some(name) = name else {
            return Err(Error::parse("community block without a name", block));
        };
        out.push(SnmpCommunity { name, group, acl });
    }

    Ok(out)
}

/// `show snmp trap`
pub fn notifications(text: &str) -> Vec<SnmpNotification> {
    text.lines()
        .filter_map(|line| regex!(r"(\w+)\s+([-_\w]+)\s+(\w+).*$").captures(line))
        // column header
        .skip(1)
        .map(|caps| SnmpNotification {
            name: format!("{} {}", &caps[1], &caps[2]),
            enabled: caps[3].eq_ignore_ascii_case("yes"),
        })
        .collect()
}

/// `show snmp host`
///
/// Every entry yields a record; the same host may appear several times
/// with different ports, credentials or versions.
pub fn notification_receivers(text: &str) -> Result<Vec<NotificationReceiver>, Error> {
    let re = regex!(
        r"(?s)host: ([^\s]+)\s+.*?port: (\d+)\s+type: (\w+)\s*user: (.*?)\s+security model: (.*?)(?:\n|\z)"
    );

    re.captures_iter(text)
        .map(|caps| {
            let entry = &caps[0];
            let port = caps[2]
                .parse()
                .map_err(|_| Error::parse(format!("invalid udp-port '{}'", &caps[2]), entry))?;
            let model = caps[5].trim();

            let Some(version) = regex!(r"^(v\d)").captures(model) else {
                return Err(Error::parse(
                    format!("unknown security model '{model}'"),
                    entry,
                ));
            };
            let version: SnmpVersion = version[1].parse()?;

            let credential = caps[4].trim().to_owned();
            let auth = if version == SnmpVersion::V3 {
                let security = regex!(r"^v3 (\w+)")
                    .captures(model)
                    .map_or_else(|| "noauth".to_owned(), |c| c[1].to_owned());
                ReceiverAuth::User {
                    username: credential,
                    security,
                }
            } else {
                ReceiverAuth::Community(credential)
            };

            let kind = if caps[3].contains("trap") {
                NotificationKind::Traps
            } else {
                NotificationKind::Informs
            };

            Ok(NotificationReceiver {
                host: caps[1].to_owned(),
                port,
                kind,
                version,
                auth,
            })
        })
        .collect()
}

/// `show snmp user`
pub fn users(text: &str) -> Result<Vec<SnmpUser>, Error> {
    let mut out = Vec::new();

    for block in text.split("\n\n") {
        let mut name = None;
        let mut version = None;
        let mut group = None;
        let mut auth = None;
        let mut privacy = None;
        let mut engine_id = None;

        for caps in regex!(r"(?m)^\s*([A-Za-z][A-Za-z ]*?)\s*:\s*(\S.*?)\s*$").captures_iter(block) {
            let value = caps[2].to_owned();
            match &caps[1] {
                "User name" => name = Some(value),
                "Security model" => version = Some(value.parse::<SnmpVersion>()?),
                "Group" => group = Some(value),
                "Engine ID" => engine_id = Some(value),
                "Authentication" => auth = Some(protocol_token(&value)),
                "Privacy" => privacy = Some(protocol_token(&value)),
                _ => {}
            }
        }

        let Some(name) = name else {
            continue;
        };
        let (Some(version), Some(group)) = (version, group) else {
            return Err(Error::parse(
                format!("snmp user '{name}' is missing its security model or group"),
                block,
            ));
        };
        out.push(SnmpUser {
            name,
            version,
            group,
            auth,
            privacy,
            engine_id,
        });
    }

    Ok(out)
}

/// `SHA` -> `sha`, `AES-128` -> `aes`
fn protocol_token(value: &str) -> String {
    value
        .split('-')
        .next()
        .unwrap_or(value)
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const COMMUNITIES: &str = "\
Community name: jeff
Community access: read-write
Access list: stest1

Community name: jeff2
Community access: read-write
Access list: stest2 (non-existent)

Community name: private
Community access: read-only
";

    const TRAPS: &str = "\
Category       Trap                        Enabled
-------------- --------------------------- ----------
bgp            arista-backward-transition  no
bgp            arista-established          no
entity         entity-config-change        yes
snmpConfigManEvent arista-config-man-event Yes
";

    const HOSTS: &str = "\
Notification host: 127.0.0.1       udp-port: 162   type: trap
user: public                       security model: v3 noauth

Notification host: 127.0.0.1       udp-port: 10162 type: inform
user: smtpuser                     security model: v3 auth

Notification host: 127.0.0.2       udp-port: 162   type: trap
user: private                      security model: v2c

Notification host: 127.0.0.3       udp-port: 162   type: trap
user: public                       security model: v1";

    const USERS: &str = "\
User name      : admin
Security model : v3
Engine ID      : f5717f00420008177800
Authentication : SHA
Privacy        : AES-128
Group          : developers

User name      : luser
Security model : v2c
Group          : network-operators
";

    #[test]
    fn enable_state_markers() {
        assert!(!enabled("SNMP agent disabled: no communities or users configured").unwrap_or(true));
        assert!(enabled("0 SNMP packets input\n    0 Bad SNMP version errors").unwrap_or(false));
        match enabled("garbage") {
            Err(Error::Parse { message, .. }) => {
                assert!(message.contains("could not parse"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn communities_strip_parenthetical_annotations() {
        let parsed = communities(COMMUNITIES).unwrap_or_default();
        assert_eq!(parsed.len(), 3);
        assert_eq!(
            parsed[1],
            SnmpCommunity {
                name: "jeff2".into(),
                group: Some(CommunityGroup::Rw),
                acl: Some("stest2".into()),
            }
        );
        assert_eq!(parsed[2].group, Some(CommunityGroup::Ro));
        assert_eq!(parsed[2].acl, None);
    }

    #[test]
    fn communities_of_empty_output() {
        assert!(communities("").unwrap_or_default().is_empty());
    }

    #[test]
    fn traps_skip_header_and_read_enabled_column() {
        let parsed = notifications(TRAPS);
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0].name, "bgp arista-backward-transition");
        assert!(!parsed[0].enabled);
        assert_eq!(parsed[2].name, "entity entity-config-change");
        assert!(parsed[2].enabled);
        assert!(parsed[3].enabled);
    }

    #[test]
    fn receivers_keep_duplicate_hosts_apart() {
        let parsed = notification_receivers(HOSTS).unwrap_or_default();
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0].host, "127.0.0.1");
        assert_eq!(parsed[0].port, 162);
        assert_eq!(parsed[0].kind, NotificationKind::Traps);
        assert_eq!(
            parsed[0].auth,
            ReceiverAuth::User {
                username: "public".into(),
                security: "noauth".into()
            }
        );

        assert_eq!(parsed[1].host, "127.0.0.1");
        assert_eq!(parsed[1].port, 10162);
        assert_eq!(parsed[1].kind, NotificationKind::Informs);
        assert_ne!(parsed[0].key(), parsed[1].key());

        assert_eq!(parsed[2].version, SnmpVersion::V2);
        assert_eq!(parsed[2].auth, ReceiverAuth::Community("private".into()));
        assert_eq!(parsed[3].version, SnmpVersion::V1);
    }

    #[test]
    fn users_parse_protocols() {
        let parsed = users(USERS).unwrap_or_default();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "admin");
        assert_eq!(parsed[0].version, SnmpVersion::V3);
        assert_eq!(parsed[0].auth.as_deref(), Some("sha"));
        assert_eq!(parsed[0].privacy.as_deref(), Some("aes"));
        assert_eq!(parsed[0].engine_id.as_deref(), Some("f5717f00420008177800"));
        assert_eq!(parsed[1].group, "network-operators");
        assert_eq!(parsed[1].auth, None);
    }
}

//! SNMP command handlers.

use tabled::Tabled;

use eos_core::{
    ApplyReport, Change, CommunityGroup, CoreError, EosClient, Ensure, NotificationKind,
    SETTINGS, SnmpCommunityProvider, SnmpCommunityResource, SnmpNotificationProvider,
    SnmpNotificationResource, SnmpReceiverProvider, SnmpReceiverResource, SnmpSettingsProvider,
    SnmpSettingsResource, SnmpUserProvider, SnmpUserResource, SnmpVersion,
};

use crate::cli::{
    CommunityAccess, GlobalOpts, ReceiverIdentity, ReceiverType, SnmpArgs, SnmpCommand,
    SnmpCommunityCommand, SnmpNotificationCommand, SnmpReceiverCommand, SnmpUserCommand,
    SnmpVersionArg,
};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

// ── Value conversions ───────────────────────────────────────────────

impl From<SnmpVersionArg> for SnmpVersion {
    fn from(v: SnmpVersionArg) -> Self {
        match v {
            SnmpVersionArg::V1 => Self::V1,
            SnmpVersionArg::V2 => Self::V2,
            SnmpVersionArg::V3 => Self::V3,
        }
    }
}

impl From<CommunityAccess> for CommunityGroup {
    fn from(g: CommunityAccess) -> Self {
        match g {
            CommunityAccess::Ro => Self::Ro,
            CommunityAccess::Rw => Self::Rw,
        }
    }
}

impl From<ReceiverType> for NotificationKind {
    fn from(t: ReceiverType) -> Self {
        match t {
            ReceiverType::Traps => Self::Traps,
            ReceiverType::Informs => Self::Informs,
        }
    }
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CommunityRow {
    #[tabled(rename = "Community")]
    name: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "ACL")]
    acl: String,
}

impl From<&SnmpCommunityResource> for CommunityRow {
    fn from(c: &SnmpCommunityResource) -> Self {
        Self {
            name: c.name.clone(),
            group: or_dash(c.group),
            acl: or_dash(c.acl.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct NotificationRow {
    #[tabled(rename = "Notification")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

#[derive(Tabled)]
struct ReceiverRow {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Credential")]
    credential: String,
}

impl From<&SnmpReceiverResource> for ReceiverRow {
    fn from(r: &SnmpReceiverResource) -> Self {
        let credential = match (&r.community, &r.username) {
            (Some(community), _) => community.clone(),
            (None, Some(user)) => format!(
                "{user} ({})",
                r.security.as_deref().unwrap_or("noauth")
            ),
            (None, None) => "-".into(),
        };
        Self {
            host: r.host.clone(),
            port: or_dash(r.port),
            kind: or_dash(r.kind),
            version: or_dash(r.version),
            credential,
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "User")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Auth")]
    auth: String,
    #[tabled(rename = "Privacy")]
    privacy: String,
}

impl From<&SnmpUserResource> for UserRow {
    fn from(u: &SnmpUserResource) -> Self {
        Self {
            name: u.name.clone(),
            version: u.version.to_string(),
            group: or_dash(u.roles.as_deref()),
            auth: or_dash(u.auth.as_deref()),
            privacy: or_dash(u.privacy.as_deref()),
        }
    }
}

fn settings_detail(s: &SnmpSettingsResource) -> String {
    [
        format!("Agent:    {}", match s.enable {
            Some(true) => "enabled",
            Some(false) => "disabled",
            None => "-",
        }),
        format!("Contact:  {}", or_dash(s.contact.as_deref())),
        format!("Location: {}", or_dash(s.location.as_deref())),
    ]
    .join("\n")
}

fn receiver(id: ReceiverIdentity, ensure: Ensure) -> SnmpReceiverResource {
    SnmpReceiverResource {
        host: id.host,
        ensure,
        port: id.port,
        version: id.snmp_version.map(SnmpVersion::from),
        community: id.community,
        username: id.user,
        ..SnmpReceiverResource::default()
    }
}

fn user(
    name: &str,
    version: Option<SnmpVersionArg>,
    ensure: Ensure,
) -> Result<SnmpUserResource, CliError> {
    let mut user = SnmpUserResource::from_name(name)?;
    if let Some(version) = version {
        user.version = version.into();
    }
    user.ensure = ensure;
    Ok(user)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &EosClient,
    args: SnmpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SnmpCommand::Show => {
            util::show(&SnmpSettingsProvider::new(client), global, settings_detail).await
        }

        SnmpCommand::Set { contact, location } => {
            util::require_any("snmp", &[contact.is_some(), location.is_some()])?;
            let desired = SnmpSettingsResource {
                contact,
                location,
                enable: None,
            };
            util::apply(&SnmpSettingsProvider::new(client), &desired, global).await
        }

        SnmpCommand::Enable => set_agent(client, true, global).await,
        SnmpCommand::Disable => set_agent(client, false, global).await,

        SnmpCommand::Communities { command } => communities(client, command, global).await,
        SnmpCommand::Notifications { command } => notifications(client, command, global).await,
        SnmpCommand::Receivers { command } => receivers(client, command, global).await,
        SnmpCommand::Users { command } => users(client, command, global).await,
    }
}

/// The agent switch lives outside the settings resource, which only reports it.
async fn set_agent(client: &EosClient, enabled: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let current = client
        .snmp_settings()
        .await
        .map_err(CoreError::from)?
        .enabled;
    let mut report = ApplyReport::new("snmp_agent", SETTINGS);
    if current != enabled {
        client
            .snmp_set_enable(enabled)
            .await
            .map_err(CoreError::from)?;
        report.changes.push(Change::Set {
            property: "enable".into(),
            from: Some(current.to_string()),
            to: enabled.to_string(),
        });
    }
    util::print_report(&report, global)
}

async fn communities(
    client: &EosClient,
    command: SnmpCommunityCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = SnmpCommunityProvider::new(client);
    match command {
        SnmpCommunityCommand::List => {
            util::list(&provider, global, |c| CommunityRow::from(c), |c| c.name.clone()).await
        }
        SnmpCommunityCommand::Ensure { name, group, acl } => {
            let desired = SnmpCommunityResource {
                name,
                ensure: Ensure::Present,
                group: group.map(CommunityGroup::from),
                acl,
            };
            util::apply(&provider, &desired, global).await
        }
        SnmpCommunityCommand::Remove { name } => {
            let desired = SnmpCommunityResource {
                name: name.clone(),
                ensure: Ensure::Absent,
                ..SnmpCommunityResource::default()
            };
            util::remove(&provider, &desired, &name, global).await
        }
    }
}

async fn notifications(
    client: &EosClient,
    command: SnmpNotificationCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = SnmpNotificationProvider::new(client);
    match command {
        SnmpNotificationCommand::List => {
            util::list(
                &provider,
                global,
                |n| NotificationRow {
                    name: n.name.clone(),
                    enabled: or_dash(n.enable),
                },
                |n| n.name.clone(),
            )
            .await
        }
        SnmpNotificationCommand::Set { name, enable } => {
            let desired = SnmpNotificationResource {
                name,
                enable: Some(enable),
            };
            util::apply(&provider, &desired, global).await
        }
    }
}

async fn receivers(
    client: &EosClient,
    command: SnmpReceiverCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = SnmpReceiverProvider::new(client);
    match command {
        SnmpReceiverCommand::List => {
            util::list(
                &provider,
                global,
                |r| ReceiverRow::from(r),
                |r| r.to_receiver().map_or_else(|_| r.host.clone(), |rx| rx.key()),
            )
            .await
        }
        SnmpReceiverCommand::Ensure { id, kind, security } => {
            let desired = SnmpReceiverResource {
                kind: kind.map(NotificationKind::from),
                security,
                ..receiver(id, Ensure::Present)
            };
            util::apply(&provider, &desired, global).await
        }
        SnmpReceiverCommand::Remove { id, kind, security } => {
            let desired = SnmpReceiverResource {
                kind: kind.map(NotificationKind::from),
                security,
                ..receiver(id, Ensure::Absent)
            };
            let key = desired.to_receiver()?.key();
            util::remove(&provider, &desired, &key, global).await
        }
    }
}

async fn users(
    client: &EosClient,
    command: SnmpUserCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = SnmpUserProvider::new(client);
    match command {
        SnmpUserCommand::List => {
            util::list(&provider, global, |u| UserRow::from(u), SnmpUserResource::key).await
        }
        SnmpUserCommand::Ensure {
            name,
            snmp_version,
            group,
            auth,
            password,
            privacy,
            private_key,
        } => {
            let desired = SnmpUserResource {
                roles: group,
                auth,
                password,
                privacy,
                private_key,
                ..user(&name, snmp_version, Ensure::Present)?
            };
            util::apply(&provider, &desired, global).await
        }
        SnmpUserCommand::Remove { name, snmp_version } => {
            let desired = user(&name, snmp_version, Ensure::Absent)?;
            util::remove(&provider, &desired, &desired.key(), global).await
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn user_version_flag_overrides_name_suffix() {
        let u = user("ops:v2", Some(SnmpVersionArg::V3), Ensure::Absent).unwrap();
        assert_eq!(u.name, "ops");
        assert_eq!(u.version, SnmpVersion::V3);
        assert_eq!(u.ensure, Ensure::Absent);

        let u = user("ops", None, Ensure::Present).unwrap();
        assert_eq!(u.key(), "ops:v3");
    }

    #[test]
    fn receiver_row_shows_v3_security() {
        let r = SnmpReceiverResource {
            host: "10.0.0.9".into(),
            username: Some("monitor".into()),
            security: Some("priv".into()),
            ..SnmpReceiverResource::default()
        };
        assert_eq!(ReceiverRow::from(&r).credential, "monitor (priv)");
    }
}

// SNMP providers
//
// Agent settings, communities, trap toggles, notification receivers and
// users. Turning the agent on or off is not a settings property: EOS
// enables the agent implicitly when a community or user exists.

use serde::{Deserialize, Serialize};
use tracing::debug;

use eos_api::{
    CommunityGroup, EosClient, NotificationKind, NotificationReceiver, ReceiverAuth,
    SnmpCommunity, SnmpUser, SnmpVersion,
};

use crate::convert::split_snmp_user_name;
use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift, reject_unsupported};
use crate::resources::SETTINGS;

// ── Settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpSettingsResource {
    pub contact: Option<String>,
    pub location: Option<String>,
    /// Reported by `instances`; cannot be managed.
    pub enable: Option<bool>,
}

pub struct SnmpSettingsProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SnmpSettingsProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SnmpSettingsProvider<'_> {
    type Resource = SnmpSettingsResource;
    const KIND: &'static str = "snmp_settings";

    async fn instances(&self) -> Result<Vec<SnmpSettingsResource>, CoreError> {
        let settings = self.client.snmp_settings().await?;
        Ok(vec![SnmpSettingsResource {
            contact: Some(settings.contact),
            location: Some(settings.location),
            enable: Some(settings.enabled),
        }])
    }

    async fn apply(&self, desired: &SnmpSettingsResource) -> Result<ApplyReport, CoreError> {
        reject_unsupported(Self::KIND, "enable", desired.enable.as_ref())?;

        let mut report = ApplyReport::new(Self::KIND, SETTINGS);
        let current = self.client.snmp_settings().await?;

        if let Some(contact) = drift(desired.contact.as_deref(), Some(current.contact.as_str())) {
            self.client.snmp_set_contact(contact).await?;
            report.set("contact", Some(&current.contact), contact);
        }
        if let Some(location) = drift(desired.location.as_deref(), Some(current.location.as_str()))
        {
            self.client.snmp_set_location(location).await?;
            report.set("location", Some(&current.location), location);
        }
        Ok(report)
    }
}

// ── Communities ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpCommunityResource {
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub group: Option<CommunityGroup>,
    pub acl: Option<String>,
}

impl From<SnmpCommunity> for SnmpCommunityResource {
    fn from(community: SnmpCommunity) -> Self {
        Self {
            name: community.name,
            ensure: Ensure::Present,
            group: community.group,
            acl: community.acl,
        }
    }
}

pub struct SnmpCommunityProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SnmpCommunityProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SnmpCommunityProvider<'_> {
    type Resource = SnmpCommunityResource;
    const KIND: &'static str = "snmp_community";

    async fn instances(&self) -> Result<Vec<SnmpCommunityResource>, CoreError> {
        Ok(self
            .client
            .snmp_communities()
            .await?
            .into_iter()
            .map(SnmpCommunityResource::from)
            .collect())
    }

    async fn apply(&self, desired: &SnmpCommunityResource) -> Result<ApplyReport, CoreError> {
        let name = desired.name.as_str();
        let mut report = ApplyReport::new(Self::KIND, name);
        let current = self
            .instances()
            .await?
            .into_iter()
            .find(|c| c.name == name);

        match (desired.ensure, current) {
            (Ensure::Absent, None) => {}
            (Ensure::Absent, Some(_)) => {
                self.client.snmp_community_destroy(name).await?;
                report.destroyed();
            }
            (Ensure::Present, None) => {
                self.client
                    .snmp_community_set(name, desired.group, desired.acl.as_deref())
                    .await?;
                report.created();
            }
            (Ensure::Present, Some(current)) => {
                let group = drift(desired.group.as_ref(), current.group.as_ref());
                let acl = drift(desired.acl.as_deref(), current.acl.as_deref());
                if group.is_none() && acl.is_none() {
                    return Ok(report);
                }
                // one command carries both; unmanaged values are kept
                self.client
                    .snmp_community_set(
                        name,
                        desired.group.or(current.group),
                        desired.acl.as_deref().or(current.acl.as_deref()),
                    )
                    .await?;
                if let Some(group) = group {
                    report.set("group", current.group.as_ref(), group);
                }
                if let Some(acl) = acl {
                    report.set("acl", current.acl.as_deref(), acl);
                }
            }
        }
        Ok(report)
    }
}

// ── Notifications ───────────────────────────────────────────────────

/// One trap toggle. `all` addresses every trap at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpNotificationResource {
    pub name: String,
    pub enable: Option<bool>,
}

pub struct SnmpNotificationProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SnmpNotificationProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SnmpNotificationProvider<'_> {
    type Resource = SnmpNotificationResource;
    const KIND: &'static str = "snmp_notification";

    async fn instances(&self) -> Result<Vec<SnmpNotificationResource>, CoreError> {
        Ok(self
            .client
            .snmp_notifications()
            .await?
            .into_iter()
            .map(|n| SnmpNotificationResource {
                name: n.name,
                enable: Some(n.enabled),
            })
            .collect())
    }

    async fn apply(&self, desired: &SnmpNotificationResource) -> Result<ApplyReport, CoreError> {
        let mut report = ApplyReport::new(Self::KIND, &desired.name);
        let Some(enable) = desired.enable else {
            return Ok(report);
        };
        let current = self
            .instances()
            .await?
            .into_iter()
            .find(|n| n.name == desired.name)
            .and_then(|n| n.enable);

        if current != Some(enable) {
            self.client
                .snmp_notification_set(&desired.name, enable)
                .await?;
            report.set("enable", current.as_ref(), &enable);
        }
        Ok(report)
    }
}

// ── Notification receivers ──────────────────────────────────────────

/// An `snmp-server host` entry. Entries are distinct when any of host,
/// credential, port, type, version or security differs, so `Present` adds
/// the full record when it is missing and leaves other entries for the
/// same host alone. `Absent` removes every entry with the same host,
/// credential and port, narrowed by type, version and security when those
/// are set.
///
/// `community` addresses v1/v2c receivers; `username` plus `security`
/// addresses v3 receivers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpReceiverResource {
    pub host: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub port: Option<u16>,
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>,
    pub version: Option<SnmpVersion>,
    pub community: Option<String>,
    pub username: Option<String>,
    /// `noauth`, `auth` or `priv`.
    pub security: Option<String>,
}

impl SnmpReceiverResource {
    /// Whether `receiver` is one of the entries an `Absent` resource removes.
    pub fn selects(&self, receiver: &NotificationReceiver) -> bool {
        let credential = self.community.as_deref().or(self.username.as_deref());
        let security = match &receiver.auth {
            ReceiverAuth::User { security, .. } => Some(security.as_str()),
            ReceiverAuth::Community(_) => None,
        };
        receiver.host == self.host
            && credential.is_none_or(|c| c == receiver.auth.credential())
            && receiver.port == self.port.unwrap_or(NotificationReceiver::DEFAULT_PORT)
            && self.kind.is_none_or(|k| k == receiver.kind)
            && self.version.is_none_or(|v| v == receiver.version)
            && self.security.as_deref().is_none_or(|s| Some(s) == security)
    }

    /// Fill defaults (port 162, traps, v1) and build the device record.
    pub fn to_receiver(&self) -> Result<NotificationReceiver, CoreError> {
        let version = self.version.unwrap_or(SnmpVersion::V1);
        let auth = match (version, &self.community, &self.username) {
            (SnmpVersion::V3, _, Some(username)) => ReceiverAuth::User {
                username: username.clone(),
                security: self.security.clone().unwrap_or_else(|| "noauth".into()),
            },
            (SnmpVersion::V3, _, None) => {
                return Err(CoreError::ValidationFailed {
                    message: format!("v3 receiver {} needs a username", self.host),
                });
            }
            (_, Some(community), _) => ReceiverAuth::Community(community.clone()),
            (_, None, _) => {
                return Err(CoreError::ValidationFailed {
                    message: format!("{version} receiver {} needs a community", self.host),
                });
            }
        };
        Ok(NotificationReceiver {
            host: self.host.clone(),
            port: self.port.unwrap_or(NotificationReceiver::DEFAULT_PORT),
            kind: self.kind.unwrap_or(NotificationKind::Traps),
            version,
            auth,
        })
    }
}

impl From<NotificationReceiver> for SnmpReceiverResource {
    fn from(receiver: NotificationReceiver) -> Self {
        let (community, username, security) = match receiver.auth {
            ReceiverAuth::Community(c) => (Some(c), None, None),
            ReceiverAuth::User { username, security } => (None, Some(username), Some(security)),
        };
        Self {
            host: receiver.host,
            ensure: Ensure::Present,
            port: Some(receiver.port),
            kind: Some(receiver.kind),
            version: Some(receiver.version),
            community,
            username,
            security,
        }
    }
}

pub struct SnmpReceiverProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SnmpReceiverProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SnmpReceiverProvider<'_> {
    type Resource = SnmpReceiverResource;
    const KIND: &'static str = "snmp_notification_receiver";

    async fn instances(&self) -> Result<Vec<SnmpReceiverResource>, CoreError> {
        Ok(self
            .client
            .snmp_notification_receivers()
            .await?
            .into_iter()
            .map(SnmpReceiverResource::from)
            .collect())
    }

    async fn apply(&self, desired: &SnmpReceiverResource) -> Result<ApplyReport, CoreError> {
        let want = desired.to_receiver()?;
        let mut report = ApplyReport::new(Self::KIND, want.key());
        let existing = self.client.snmp_notification_receivers().await?;

        if desired.ensure == Ensure::Absent {
            let matching: Vec<&NotificationReceiver> =
                existing.iter().filter(|r| desired.selects(r)).collect();
            for receiver in &matching {
                debug!(key = %receiver.key(), kind = %receiver.kind, "removing notification receiver");
                self.client
                    .snmp_notification_receiver_remove(receiver)
                    .await?;
            }
            if !matching.is_empty() {
                report.destroyed();
            }
            return Ok(report);
        }

        if !existing.contains(&want) {
            self.client.snmp_notification_receiver_set(&want).await?;
            report.created();
        }
        Ok(report)
    }
}

// ── Users ───────────────────────────────────────────────────────────

/// An SNMP user, identified by `name:version`. Passwords are write-only:
/// they are sent when the user is created or another property changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpUserResource {
    pub name: String,
    pub version: SnmpVersion,
    #[serde(default)]
    pub ensure: Ensure,
    /// Group (role) the user belongs to.
    pub roles: Option<String>,
    /// `md5` or `sha`.
    pub auth: Option<String>,
    pub password: Option<String>,
    /// `aes` or `des`.
    pub privacy: Option<String>,
    pub private_key: Option<String>,
}

impl SnmpUserResource {
    /// Build from a `name:version` identity.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let (name, version) = split_snmp_user_name(name)?;
        Ok(Self {
            name,
            version,
            ensure: Ensure::Present,
            roles: None,
            auth: None,
            password: None,
            privacy: None,
            private_key: None,
        })
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.name, self.version)
    }
}

impl From<SnmpUser> for SnmpUserResource {
    fn from(user: SnmpUser) -> Self {
        Self {
            name: user.name,
            version: user.version,
            ensure: Ensure::Present,
            roles: Some(user.group),
            auth: user.auth,
            password: None,
            privacy: user.privacy,
            private_key: None,
        }
    }
}

pub struct SnmpUserProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SnmpUserProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SnmpUserProvider<'_> {
    type Resource = SnmpUserResource;
    const KIND: &'static str = "snmp_user";

    async fn instances(&self) -> Result<Vec<SnmpUserResource>, CoreError> {
        Ok(self
            .client
            .snmp_users()
            .await?
            .into_iter()
            .map(SnmpUserResource::from)
            .collect())
    }

    async fn apply(&self, desired: &SnmpUserResource) -> Result<ApplyReport, CoreError> {
        let mut report = ApplyReport::new(Self::KIND, desired.key());
        let current = self
            .client
            .snmp_users()
            .await?
            .into_iter()
            .find(|u| u.name == desired.name && u.version == desired.version);

        let current = match (desired.ensure, current) {
            (Ensure::Absent, None) => return Ok(report),
            (Ensure::Absent, Some(user)) => {
                self.client.snmp_user_destroy(&user).await?;
                report.destroyed();
                return Ok(report);
            }
            (Ensure::Present, current) => current,
        };

        let group = desired
            .roles
            .clone()
            .or_else(|| current.as_ref().map(|u| u.group.clone()))
            .ok_or_else(|| CoreError::ValidationFailed {
                message: format!("snmp user {} needs a group (roles)", desired.name),
            })?;
        let want = SnmpUser {
            name: desired.name.clone(),
            version: desired.version,
            group,
            auth: desired
                .auth
                .clone()
                .or_else(|| current.as_ref().and_then(|u| u.auth.clone())),
            privacy: desired
                .privacy
                .clone()
                .or_else(|| current.as_ref().and_then(|u| u.privacy.clone())),
            engine_id: current.as_ref().and_then(|u| u.engine_id.clone()),
        };

        match &current {
            Some(have) if *have == want => return Ok(report),
            Some(have) => {
                if have.group != want.group {
                    report.set("roles", Some(&have.group), &want.group);
                }
                if have.auth != want.auth {
                    report.set("auth", have.auth.as_deref(), want.auth.as_deref().unwrap_or("none"));
                }
                if have.privacy != want.privacy {
                    report.set(
                        "privacy",
                        have.privacy.as_deref(),
                        want.privacy.as_deref().unwrap_or("none"),
                    );
                }
            }
            None => report.created(),
        }

        self.client
            .snmp_user_set(&want, desired.password.as_deref(), desired.private_key.as_deref())
            .await?;
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn receiver_defaults() {
        let resource = SnmpReceiverResource {
            host: "10.0.0.9".into(),
            community: Some("public".into()),
            ..SnmpReceiverResource::default()
        };
        let receiver = resource.to_receiver().unwrap();
        assert_eq!(receiver.port, 162);
        assert_eq!(receiver.kind, NotificationKind::Traps);
        assert_eq!(receiver.version, SnmpVersion::V1);
        assert_eq!(receiver.key(), "10.0.0.9:public:162");
    }

    #[test]
    fn absent_receiver_selects_by_set_fields() {
        let trap = NotificationReceiver {
            host: "10.0.0.9".into(),
            port: 162,
            kind: NotificationKind::Traps,
            version: SnmpVersion::V2,
            auth: ReceiverAuth::Community("public".into()),
        };
        let inform = NotificationReceiver {
            kind: NotificationKind::Informs,
            ..trap.clone()
        };
        let mut resource = SnmpReceiverResource {
            host: "10.0.0.9".into(),
            ensure: Ensure::Absent,
            community: Some("public".into()),
            ..SnmpReceiverResource::default()
        };
        assert!(resource.selects(&trap) && resource.selects(&inform));

        resource.kind = Some(NotificationKind::Informs);
        assert!(!resource.selects(&trap));
        assert!(resource.selects(&inform));

        resource.port = Some(10162);
        assert!(!resource.selects(&inform));
    }

    #[test]
    fn v3_receiver_needs_username() {
        let resource = SnmpReceiverResource {
            host: "10.0.0.9".into(),
            version: Some(SnmpVersion::V3),
            community: Some("public".into()),
            ..SnmpReceiverResource::default()
        };
        assert!(matches!(
            resource.to_receiver(),
            Err(CoreError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn user_identity() {
        let user = SnmpUserResource::from_name("nms:v3").unwrap();
        assert_eq!(user.key(), "nms:v3");
        assert_eq!(user.version, SnmpVersion::V3);
    }
}

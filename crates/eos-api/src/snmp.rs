// SNMP endpoints
//
// Location and contact have JSON models; agent state, communities, traps,
// hosts and users are text-only and go through `parse::snmp`.

use tracing::debug;

use crate::client::{EosClient, config_batch, negate};
use crate::error::Error;
use crate::models::{
    CommunityGroup, NotificationReceiver, ReceiverAuth, ShowSnmpContact, ShowSnmpLocation,
    SnmpCommunity, SnmpNotification, SnmpSettings, SnmpUser, SnmpVersion,
};
use crate::parse::snmp as parse;

/// Trap name that addresses every notification at once.
pub const ALL_NOTIFICATIONS: &str = "all";

impl EosClient {
    // ── Agent settings ───────────────────────────────────────────────

    /// Location, contact and agent state in one record.
    pub async fn snmp_settings(&self) -> Result<SnmpSettings, Error> {
        Ok(SnmpSettings {
            location: self.snmp_location().await?,
            enabled: self.snmp_enabled().await?,
            contact: self.snmp_contact().await?,
        })
    }

    /// `show snmp location`
    pub async fn snmp_location(&self) -> Result<String, Error> {
        let show: ShowSnmpLocation = self
            .last_json(&["show snmp location".to_owned()], "get snmp location")
            .await?;
        Ok(show.location)
    }

    /// `show snmp contact`
    pub async fn snmp_contact(&self) -> Result<String, Error> {
        let show: ShowSnmpContact = self
            .last_json(&["show snmp contact".to_owned()], "get snmp contact")
            .await?;
        Ok(show.contact)
    }

    /// `show snmp` (text)
    pub async fn snmp_enabled(&self) -> Result<bool, Error> {
        let text = self
            .last_output(&["show snmp".to_owned()], "get snmp status")
            .await?;
        parse::enabled(&text)
    }

    /// Enabling creates the `public` read-only community; disabling removes
    /// the whole SNMP configuration.
    pub async fn snmp_set_enable(&self, enabled: bool) -> Result<(), Error> {
        let cmd = if enabled {
            "snmp-server community public ro"
        } else {
            "no snmp-server"
        };
        self.configure(&config_batch([cmd]), "configure snmp").await
    }

    pub async fn snmp_set_contact(&self, contact: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("snmp-server contact {contact}")]),
            "set snmp contact",
        )
        .await
    }

    pub async fn snmp_set_location(&self, location: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("snmp-server location {location}")]),
            "set snmp location",
        )
        .await
    }

    // ── Communities ──────────────────────────────────────────────────

    /// `show snmp community` (text)
    pub async fn snmp_communities(&self) -> Result<Vec<SnmpCommunity>, Error> {
        let text = self
            .last_output(&["show snmp community".to_owned()], "get snmp communities")
            .await?;
        parse::communities(&text)
    }

    /// `snmp-server community <name> [<ro|rw>] [<acl>]`
    pub async fn snmp_community_set(
        &self,
        name: &str,
        group: Option<CommunityGroup>,
        acl: Option<&str>,
    ) -> Result<(), Error> {
        self.configure(
            &config_batch([community_command(name, group, acl)]),
            "define snmp community",
        )
        .await
    }

    pub async fn snmp_community_destroy(&self, name: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no snmp-server community {name}")]),
            "destroy snmp community",
        )
        .await
    }

    // ── Notifications (traps) ────────────────────────────────────────

    /// `show snmp trap` (text)
    pub async fn snmp_notifications(&self) -> Result<Vec<SnmpNotification>, Error> {
        let text = self
            .last_output(&["show snmp trap".to_owned()], "get snmp traps")
            .await?;
        Ok(parse::notifications(&text))
    }

    /// `[no] snmp-server enable traps [<name>]`; `all` addresses every trap.
    pub async fn snmp_notification_set(&self, name: &str, enabled: bool) -> Result<(), Error> {
        debug!(name, enabled, "setting snmp trap");
        self.configure(
            &config_batch([notification_command(name, enabled)]),
            "set snmp trap",
        )
        .await
    }

    // ── Notification receivers ───────────────────────────────────────

    /// `show snmp host` (text)
    pub async fn snmp_notification_receivers(&self) -> Result<Vec<NotificationReceiver>, Error> {
        let text = self
            .last_output(&["show snmp host".to_owned()], "get snmp notification hosts")
            .await?;
        parse::notification_receivers(&text)
    }

    pub async fn snmp_notification_receiver_set(
        &self,
        receiver: &NotificationReceiver,
    ) -> Result<(), Error> {
        self.configure(
            &config_batch([receiver_command(receiver)]),
            "set snmp host",
        )
        .await
    }

    pub async fn snmp_notification_receiver_remove(
        &self,
        receiver: &NotificationReceiver,
    ) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no {}", receiver_command(receiver))]),
            "remove snmp host",
        )
        .await
    }

    // ── Users ────────────────────────────────────────────────────────

    /// `show snmp user` (text)
    pub async fn snmp_users(&self) -> Result<Vec<SnmpUser>, Error> {
        let text = self
            .last_output(&["show snmp user".to_owned()], "get snmp users")
            .await?;
        parse::users(&text)
    }

    /// Create or replace a user. Passwords are only used for v3.
    pub async fn snmp_user_set(
        &self,
        user: &SnmpUser,
        auth_password: Option<&str>,
        privacy_password: Option<&str>,
    ) -> Result<(), Error> {
        let cmd = user_command(user, auth_password, privacy_password)?;
        self.configure(&config_batch([cmd]), &format!("set snmp user {}", user.name))
            .await
    }

    pub async fn snmp_user_destroy(&self, user: &SnmpUser) -> Result<(), Error> {
        self.configure(
            &config_batch([format!(
                "no snmp-server user {} {} {}",
                user.name,
                user.group,
                user_version_keyword(user.version)
            )]),
            &format!("destroy snmp user {}", user.name),
        )
        .await
    }
}

// ── Command builders ─────────────────────────────────────────────────

pub(crate) fn community_command(
    name: &str,
    group: Option<CommunityGroup>,
    acl: Option<&str>,
) -> String {
    let mut cmd = format!("snmp-server community {name}");
    if let Some(group) = group {
        cmd.push(' ');
        cmd.push_str(group.as_ref());
    }
    if let Some(acl) = acl {
        cmd.push(' ');
        cmd.push_str(acl);
    }
    cmd
}

pub(crate) fn notification_command(name: &str, enabled: bool) -> String {
    if name == ALL_NOTIFICATIONS {
        negate(enabled, "snmp-server enable traps")
    } else {
        negate(enabled, &format!("snmp-server enable traps {name}"))
    }
}

/// `snmp-server host <host> <traps|informs> version <1|2c|3> [<security>]
/// <credential> udp-port <port>`
pub(crate) fn receiver_command(receiver: &NotificationReceiver) -> String {
    let mut cmd = format!(
        "snmp-server host {} {} version {}",
        receiver.host,
        receiver.kind,
        receiver.version.keyword()
    );
    if receiver.version == SnmpVersion::V3 {
        let security = match &receiver.auth {
            ReceiverAuth::User { security, .. } => security.as_str(),
            ReceiverAuth::Community(_) => "noauth",
        };
        cmd.push(' ');
        cmd.push_str(security);
    }
    cmd.push(' ');
    cmd.push_str(receiver.auth.credential());
    cmd.push_str(&format!(" udp-port {}", receiver.port));
    cmd
}

fn user_version_keyword(version: SnmpVersion) -> &'static str {
    match version {
        SnmpVersion::V1 => "v1",
        SnmpVersion::V2 => "v2c",
        SnmpVersion::V3 => "v3",
    }
}

pub(crate) fn user_command(
    user: &SnmpUser,
    auth_password: Option<&str>,
    privacy_password: Option<&str>,
) -> Result<String, Error> {
    let mut cmd = format!(
        "snmp-server user {} {} {}",
        user.name,
        user.group,
        user_version_keyword(user.version)
    );
    if user.version != SnmpVersion::V3 {
        return Ok(cmd);
    }

    match (&user.auth, auth_password) {
        (Some(proto), Some(password)) => cmd.push_str(&format!(" auth {proto} {password}")),
        (None, None) => {}
        _ => {
            return Err(Error::Validation(format!(
                "snmp user {} needs both an auth protocol and an auth password",
                user.name
            )));
        }
    }
    match (&user.privacy, privacy_password) {
        (Some(_), Some(_)) if user.auth.is_none() => Err(Error::Validation(format!(
            "snmp user {} cannot use privacy without authentication",
            user.name
        ))),
        (Some(proto), Some(password)) => {
            cmd.push_str(&format!(" priv {proto} {password}"));
            Ok(cmd)
        }
        (None, None) => Ok(cmd),
        _ => Err(Error::Validation(format!(
            "snmp user {} needs both a privacy protocol and a privacy password",
            user.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    #[test]
    fn community_command_appends_optional_parts() {
        assert_eq!(
            community_command("public", Some(CommunityGroup::Ro), None),
            "snmp-server community public ro"
        );
        assert_eq!(
            community_command("jeff", Some(CommunityGroup::Rw), Some("stest1")),
            "snmp-server community jeff rw stest1"
        );
        assert_eq!(community_command("bare", None, None), "snmp-server community bare");
    }

    #[test]
    fn notification_all_drops_the_name() {
        assert_eq!(notification_command("all", true), "snmp-server enable traps");
        assert_eq!(
            notification_command("bgp", false),
            "no snmp-server enable traps bgp"
        );
    }

    #[test]
    fn receiver_command_for_each_version() {
        let mut receiver = NotificationReceiver {
            host: "127.0.0.1".into(),
            port: 162,
            kind: NotificationKind::Traps,
            version: SnmpVersion::V3,
            auth: ReceiverAuth::User {
                username: "snmpuser".into(),
                security: "auth".into(),
            },
        };
        assert_eq!(
            receiver_command(&receiver),
            "snmp-server host 127.0.0.1 traps version 3 auth snmpuser udp-port 162"
        );

        receiver.version = SnmpVersion::V2;
        receiver.kind = NotificationKind::Informs;
        receiver.auth = ReceiverAuth::Community("public".into());
        receiver.port = 10162;
        assert_eq!(
            receiver_command(&receiver),
            "snmp-server host 127.0.0.1 informs version 2c public udp-port 10162"
        );
    }

    #[test]
    fn user_command_validates_secrets() {
        let mut user = SnmpUser {
            name: "admin".into(),
            version: SnmpVersion::V3,
            group: "developers".into(),
            auth: Some("sha".into()),
            privacy: Some("aes".into()),
            engine_id: None,
        };
        assert_eq!(
            user_command(&user, Some("authpw"), Some("privpw")).ok().as_deref(),
            Some("snmp-server user admin developers v3 auth sha authpw priv aes privpw")
        );
        assert!(user_command(&user, None, Some("privpw")).is_err());

        user.version = SnmpVersion::V2;
        assert_eq!(
            user_command(&user, None, None).ok().as_deref(),
            Some("snmp-server user admin developers v2c")
        );
    }
}

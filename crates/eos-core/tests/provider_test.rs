// Integration tests for the providers against a mocked eAPI endpoint.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eos_core::{
    Change, ChannelGroup, ClientConfig, CoreError, DnsSettings, DnsSettingsProvider, EosClient,
    Ensure, NotificationKind, NtpServerProvider, NtpServerResource, PortChannelProvider, Provider,
    SnmpReceiverProvider, SnmpReceiverResource, SnmpSettingsProvider, SnmpSettingsResource,
    SnmpVersion, SyslogSettings, SyslogSettingsProvider, VlanProvider, VlanResource,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, EosClient) {
    let server = MockServer::start().await;
    let client = EosClient::new(ClientConfig::new(server.uri())).unwrap();
    (server, client)
}

fn ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "test",
        "result": result,
    }))
}

fn text(outputs: &[&str]) -> ResponseTemplate {
    let result: Vec<Value> = outputs.iter().map(|o| json!({ "output": o })).collect();
    ok(Value::Array(result))
}

fn failed(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "test",
        "error": { "code": 1002, "message": "CLI command failed", "data": data },
    }))
}

/// Mount longer batches before their prefixes.
async fn expect_cmds(server: &MockServer, cmds: Value, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/command-api/"))
        .and(body_partial_json(json!({ "params": { "cmds": cmds } })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn vlan_10(name: &str, status: &str) -> ResponseTemplate {
    ok(json!([{
        "vlans": {
            "10": { "status": status, "name": name, "interfaces": {}, "dynamic": false }
        }
    }]))
}

// ── VLAN ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_vlan_created_then_named() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["show vlan 10"]),
        failed(json!([{ "errors": ["VLAN 10 not found in current VLAN database"] }])),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "vlan 10", "name web"]),
        ok(json!([{}, {}, {}, {}])),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "vlan 10"]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    let desired = VlanResource {
        id: 10,
        vlan_name: Some("web".into()),
        ..VlanResource::default()
    };
    let report = VlanProvider::new(&client).apply(&desired).await.unwrap();

    assert_eq!(
        report.changes,
        vec![
            Change::Created,
            Change::Set {
                property: "vlan_name".into(),
                from: None,
                to: "web".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_vlan_in_sync_is_noop() {
    let (server, client) = setup().await;
    expect_cmds(&server, json!(["show vlan 10"]), vlan_10("web", "active")).await;

    let desired = VlanResource {
        id: 10,
        vlan_name: Some("web".into()),
        shutdown: Some(false),
        ..VlanResource::default()
    };
    let report = VlanProvider::new(&client).apply(&desired).await.unwrap();
    assert!(report.is_noop());
}

#[tokio::test]
async fn test_vlan_suspend_and_destroy() {
    let (server, client) = setup().await;
    Mock::given(body_partial_json(json!({ "params": { "cmds": ["show vlan 10"] } })))
        .respond_with(vlan_10("web", "active"))
        .mount(&server)
        .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "vlan 10", "state suspend"]),
        ok(json!([{}, {}, {}, {}])),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "no vlan 10"]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    let provider = VlanProvider::new(&client);
    let report = provider
        .apply(&VlanResource {
            id: 10,
            shutdown: Some(true),
            ..VlanResource::default()
        })
        .await
        .unwrap();
    assert_eq!(report.changes.len(), 1);
    assert_eq!(report.changes[0].to_string(), "shutdown: 'false' -> 'true'");

    let report = provider
        .apply(&VlanResource {
            id: 10,
            ensure: Ensure::Absent,
            ..VlanResource::default()
        })
        .await
        .unwrap();
    assert_eq!(report.changes, vec![Change::Destroyed]);
}

#[tokio::test]
async fn test_vlan_rejection_carries_device_text() {
    let (server, client) = setup().await;
    expect_cmds(&server, json!(["show vlan 10"]), vlan_10("web", "active")).await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "no vlan 10"]),
        failed(json!([{}, {}, { "errors": ["VLAN 10 is in use by an SVI"] }])),
    )
    .await;

    let desired = VlanResource {
        id: 10,
        ensure: Ensure::Absent,
        ..VlanResource::default()
    };
    let err = VlanProvider::new(&client).apply(&desired).await.unwrap_err();

    match err {
        CoreError::Rejected { message, details, code } => {
            assert!(message.contains("could not destroy vlan 10"));
            assert_eq!(details, vec!["VLAN 10 is in use by an SVI"]);
            assert_eq!(code, Some(1002));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

// ── Unsupported properties ──────────────────────────────────────────

#[tokio::test]
async fn test_unsupported_properties_send_nothing() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = SnmpSettingsProvider::new(&client)
        .apply(&SnmpSettingsResource {
            enable: Some(false),
            ..SnmpSettingsResource::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Unsupported { ref property, .. } if property == "enable"));

    let err = PortChannelProvider::new(&client)
        .apply(&ChannelGroup {
            name: "Port-Channel1".into(),
            mtu: Some(9214),
            ..ChannelGroup::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "port_channel: setting 'mtu' is not supported on EOS"
    );
}

// ── NTP / DNS ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_ntp_prefer_rewrites_server() {
    let (server, client) = setup().await;
    expect_cmds(
        &server,
        json!(["enable", "show running-config section ntp"]),
        text(&["", "ntp source Management1\nntp server 1.2.3.4\n"]),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "ntp server 1.2.3.4 prefer"]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    let desired = NtpServerResource {
        host: "1.2.3.4".into(),
        ensure: Ensure::Present,
        prefer: Some(true),
    };
    let report = NtpServerProvider::new(&client).apply(&desired).await.unwrap();
    assert_eq!(report.changes[0].to_string(), "prefer: 'false' -> 'true'");
}

#[tokio::test]
async fn test_dns_servers_converge_to_list() {
    let (server, client) = setup().await;
    expect_cmds(
        &server,
        json!(["enable", "show running-config"]),
        text(&[
            "",
            "hostname veos\nip name-server vrf default 8.8.8.8 1.1.1.1\nip domain-name lab.local\n",
        ]),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "no ip name-server 1.1.1.1"]),
        ok(json!([{}, {}, {}])),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "ip name-server 9.9.9.9"]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    let desired = DnsSettings {
        domain: Some("lab.local".into()),
        servers: Some(vec!["8.8.8.8".into(), "9.9.9.9".into()]),
        search: None,
    };
    let report = DnsSettingsProvider::new(&client).apply(&desired).await.unwrap();
    assert_eq!(
        report.changes[0].to_string(),
        "servers: '8.8.8.8, 1.1.1.1' -> '8.8.8.8, 9.9.9.9'"
    );
}

// ── SNMP receivers ──────────────────────────────────────────────────

const TRAP_AND_INFORM: &str = "\
Notification host: 10.0.0.9        udp-port: 162   type: trap
user: public                       security model: v2c

Notification host: 10.0.0.9        udp-port: 162   type: inform
user: public                       security model: v2c";

async fn mount_receivers(server: &MockServer) {
    expect_cmds(server, json!(["show snmp host"]), text(&[TRAP_AND_INFORM])).await;
}

async fn forbid_cmds(server: &MockServer, cmds: Value) {
    Mock::given(method("POST"))
        .and(path("/command-api/"))
        .and(body_partial_json(json!({ "params": { "cmds": cmds } })))
        .respond_with(ok(json!([{}, {}, {}])))
        .expect(0)
        .mount(server)
        .await;
}

fn public_v2(kind: Option<NotificationKind>, ensure: Ensure) -> SnmpReceiverResource {
    SnmpReceiverResource {
        host: "10.0.0.9".into(),
        ensure,
        kind,
        version: Some(SnmpVersion::V2),
        community: Some("public".into()),
        ..SnmpReceiverResource::default()
    }
}

#[tokio::test]
async fn test_receiver_removal_narrowed_by_type() {
    let (server, client) = setup().await;
    mount_receivers(&server).await;
    expect_cmds(
        &server,
        json!([
            "enable",
            "configure",
            "no snmp-server host 10.0.0.9 informs version 2c public udp-port 162"
        ]),
        ok(json!([{}, {}, {}])),
    )
    .await;
    forbid_cmds(
        &server,
        json!([
            "enable",
            "configure",
            "no snmp-server host 10.0.0.9 traps version 2c public udp-port 162"
        ]),
    )
    .await;

    let desired = public_v2(Some(NotificationKind::Informs), Ensure::Absent);
    let report = SnmpReceiverProvider::new(&client).apply(&desired).await.unwrap();
    assert_eq!(report.changes, vec![Change::Destroyed]);
}

#[tokio::test]
async fn test_receiver_added_beside_same_host_entries() {
    let (server, client) = setup().await;
    mount_receivers(&server).await;
    expect_cmds(
        &server,
        json!([
            "enable",
            "configure",
            "snmp-server host 10.0.0.9 traps version 1 public udp-port 162"
        ]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    let desired = SnmpReceiverResource {
        version: Some(SnmpVersion::V1),
        ..public_v2(None, Ensure::Present)
    };
    let report = SnmpReceiverProvider::new(&client).apply(&desired).await.unwrap();
    assert_eq!(report.changes, vec![Change::Created]);
}

#[tokio::test]
async fn test_existing_receiver_is_noop() {
    let (server, client) = setup().await;
    mount_receivers(&server).await;
    forbid_cmds(&server, json!(["enable", "configure"])).await;

    let desired = public_v2(Some(NotificationKind::Informs), Ensure::Present);
    let report = SnmpReceiverProvider::new(&client).apply(&desired).await.unwrap();
    assert!(report.is_noop());
}

// ── Syslog ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_syslog_source_interfaces_converge() {
    let (server, client) = setup().await;
    // read once by the provider and once by the client before configuring
    Mock::given(method("POST"))
        .and(path("/command-api/"))
        .and(body_partial_json(json!({
            "params": { "cmds": ["enable", "show running-config all section logging"] }
        })))
        .respond_with(text(&["", "logging on\nlogging source-interface Loopback0\n"]))
        .expect(2)
        .mount(&server)
        .await;
    expect_cmds(
        &server,
        json!([
            "enable",
            "configure",
            "logging source-interface Loopback0",
            "logging vrf mgmt source-interface Management1"
        ]),
        ok(json!([{}, {}, {}, {}])),
    )
    .await;

    let desired = SyslogSettings {
        enable: Some(true),
        source_interfaces: Some(
            [("default", "Loopback0"), ("mgmt", "Management1")]
                .into_iter()
                .map(|(vrf, iface)| (vrf.to_owned(), iface.to_owned()))
                .collect(),
        ),
    };
    let report = SyslogSettingsProvider::new(&client).apply(&desired).await.unwrap();
    assert_eq!(report.changes.len(), 1);
    assert_eq!(
        report.changes[0].to_string(),
        "source_interfaces: 'default=Loopback0' -> 'default=Loopback0, mgmt=Management1'"
    );
}

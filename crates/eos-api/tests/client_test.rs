// Integration tests for `EosClient` against a mocked eAPI endpoint.

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eos_api::{
    EosClient, Error, NotificationKind, NotificationReceiver, PortChannelMode, ReceiverAuth,
    SnmpVersion, VlanState,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, EosClient) {
    let server = MockServer::start().await;
    let base = Url::parse(&server.uri()).unwrap();
    let client = EosClient::with_client(
        reqwest::Client::new(),
        &base,
        Some("admin".into()),
        Some(SecretString::from("admin")),
    )
    .unwrap();
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

fn failed(code: i64, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "test",
        "error": {
            "code": code,
            "message": "CLI command failed",
            "data": data,
        },
    }))
}

async fn expect_cmds(server: &MockServer, cmds: Value, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/command-api/"))
        .and(body_partial_json(json!({ "params": { "cmds": cmds } })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

// ── Envelope ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_envelope_and_basic_auth() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/command-api/"))
        .and(header_exists("authorization"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "runCmds",
            "params": { "version": 1, "format": "json", "cmds": ["show version"] },
        })))
        .respond_with(ok(json!([{ "modelName": "vEOS" }])))
        .expect(1)
        .mount(&server)
        .await;

    let result = client
        .perform(&["show version".to_owned()], "show version", eos_api::Format::Json)
        .await
        .unwrap();

    assert_eq!(result[0]["modelName"], "vEOS");
}

#[tokio::test]
async fn test_send_returns_device_error_unconverted() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/command-api/"))
        .and(body_partial_json(json!({ "id": "req-7" })))
        .respond_with(failed(1002, json!([{}, { "errors": ["Invalid input"] }])))
        .expect(1)
        .mount(&server)
        .await;

    let options = eos_api::RequestOptions {
        id: Some("req-7".into()),
        format: eos_api::Format::Json,
    };
    let response = client
        .send(&["enable".to_owned(), "bogus".to_owned()], &options)
        .await
        .unwrap();

    assert!(response.result.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, Some(1002));
    assert_eq!(error.data.unwrap()[1]["errors"][0], "Invalid input");
}

#[tokio::test]
async fn test_perform_text_returns_outputs() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "params": { "format": "text" } })))
        .respond_with(text(&["", "hostname veos\n"]))
        .mount(&server)
        .await;

    let outputs = client
        .perform_text(
            &["enable".to_owned(), "show running-config".to_owned()],
            "show running configuration",
        )
        .await
        .unwrap();

    assert_eq!(outputs, vec!["", "hostname veos\n"]);
}

// ── Error contract ──────────────────────────────────────────────────

#[tokio::test]
async fn test_vlan_destroy_failure_carries_device_text() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["enable", "configure", "no vlan foo"]),
        failed(
            1002,
            json!([{}, {}, { "errors": ["Invalid input (at token 2: 'foo')"] }]),
        ),
    )
    .await;

    let err = client.vlan_destroy("foo").await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("could not destroy vlan foo"), "{message}");
    assert!(message.contains("Invalid input (at token 2: 'foo')"), "{message}");
    assert_eq!(err.rpc_code(), Some(1002));
}

#[tokio::test]
async fn test_error_without_messages_reports_unknown_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "test",
            "error": { "code": 1000, "message": "boom" },
        })))
        .mount(&server)
        .await;

    let err = client.vlan_create(10).await.unwrap_err();

    match err {
        Error::OperationFailed {
            ref action,
            ref messages,
            ..
        } => {
            assert_eq!(action, "create vlan 10");
            assert_eq!(messages, &vec!["unknown error".to_owned()]);
        }
        other => panic!("expected OperationFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let result = client.vlans().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_maps_to_http_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    match client.interfaces().await {
        Err(Error::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected HttpStatus, got: {other:?}"),
    }
}

// ── VLANs ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_vlan_destroy_batch() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["enable", "configure", "no vlan 3111"]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    client.vlan_destroy(3111).await.unwrap();
}

#[tokio::test]
async fn test_vlans_sorted_numerically() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["show vlan"]),
        ok(json!([{
            "vlans": {
                "100": { "status": "active", "name": "VLAN0100", "interfaces": {}, "dynamic": false },
                "1": {
                    "status": "active",
                    "name": "default",
                    "interfaces": { "Ethernet1": { "privatePromoted": false } },
                    "dynamic": false
                },
                "20": { "status": "suspended", "name": "lab", "interfaces": {}, "dynamic": false }
            }
        }])),
    )
    .await;

    let vlans = client.vlans().await.unwrap();

    let ids: Vec<&str> = vlans.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "20", "100"]);
    assert_eq!(vlans[0].interfaces, vec!["Ethernet1"]);
    assert_eq!(vlans[1].state, VlanState::Suspend);
}

#[tokio::test]
async fn test_missing_vlan_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(failed(
            1000,
            json!([{ "errors": ["VLAN 4000 not found in current VLAN database"] }]),
        ))
        .mount(&server)
        .await;

    assert_eq!(client.vlan(4000).await.unwrap(), None);
}

#[tokio::test]
async fn test_vlan_state_rejects_unsettable_value() {
    let (_server, client) = setup().await;

    let result = client
        .vlan_set_state(10, &VlanState::Other("act/lshut".into()))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

// ── Interfaces and port-channels ────────────────────────────────────

#[tokio::test]
async fn test_interface_shutdown_batch() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["enable", "configure", "interface Ethernet1", "no shutdown"]),
        ok(json!([{}, {}, {}, {}])),
    )
    .await;

    client.interface_set_shutdown("Ethernet1", false).await.unwrap();
}

#[tokio::test]
async fn test_channel_group_create_joins_each_member() {
    let (server, client) = setup().await;

    for member in ["Ethernet1", "Ethernet2"] {
        expect_cmds(
            &server,
            json!([
                "enable",
                "configure",
                format!("interface {member}"),
                "channel-group 9 mode active"
            ]),
            ok(json!([{}, {}, {}, {}])),
        )
        .await;
    }

    client
        .channel_group_create(
            "Port-Channel9",
            PortChannelMode::Active,
            &["Ethernet1".to_owned(), "Ethernet2".to_owned()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_channel_group_create_without_members_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .channel_group_create("Port-Channel9", PortChannelMode::Active, &[])
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_channel_group_destroy_unknown_channel() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["show etherchannel detailed"]),
        text(&["Port Channel Port-Channel3:\n  Active Ports:\n       Port            Time became active\n    --------------- ------------------\n       Ethernet1       3:00:59\n\n"]),
    )
    .await;

    let err = client
        .channel_group_destroy("Port-Channel99")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Port-Channel99 is not in [\"Port-Channel3\"]"
    );
}

#[tokio::test]
async fn test_channel_group_destroy_unsets_each_member() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["show etherchannel detailed"]),
        text(&["Port Channel Port-Channel3:\n  Active Ports:\n       Port            Time became active\n    --------------- ------------------\n       Ethernet2       3:00:59\n       Ethernet1       3:00:59\n\n"]),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "interface Ethernet1", "no channel-group"]),
        ok(json!([{}, {}, {}, {}])),
    )
    .await;
    expect_cmds(
        &server,
        json!(["enable", "configure", "interface Ethernet2", "no channel-group"]),
        ok(json!([{}, {}, {}, {}])),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({ "params": { "cmds": ["enable", "configure", "no interface Port-Channel3"] } }),
        ))
        .respond_with(ok(json!([{}, {}, {}])))
        .expect(0)
        .mount(&server)
        .await;

    client.channel_group_destroy("Port-Channel3").await.unwrap();
}

// ── SNMP ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_snmp_community_set_batch() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["enable", "configure", "snmp-server community public ro"]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    client
        .snmp_community_set("public", Some(eos_api::CommunityGroup::Ro), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_snmp_enabled_from_text() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["show snmp"]),
        text(&["SNMP agent disabled: no communities or users configured\n"]),
    )
    .await;

    assert!(!client.snmp_enabled().await.unwrap());
}

#[tokio::test]
async fn test_snmp_receiver_remove_batch() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!([
            "enable",
            "configure",
            "no snmp-server host 127.0.0.1 traps version 2c public udp-port 162"
        ]),
        ok(json!([{}, {}, {}])),
    )
    .await;

    let receiver = NotificationReceiver {
        host: "127.0.0.1".into(),
        port: NotificationReceiver::DEFAULT_PORT,
        kind: NotificationKind::Traps,
        version: SnmpVersion::V2,
        auth: ReceiverAuth::Community("public".into()),
    };
    client
        .snmp_notification_receiver_remove(&receiver)
        .await
        .unwrap();
}

// ── AAA ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_radius_config_from_running_config() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["enable", "show running-config all section radius"]),
        text(&[
            "",
            "radius-server key 7 070E234F1F5B4A\nradius-server timeout 5\nradius-server retransmit 3\nradius-server host 10.11.12.13 key 7 0207165218120E\n",
        ]),
    )
    .await;

    let radius = client.radius_config().await.unwrap();

    assert_eq!(radius.global.timeout, Some(5));
    assert_eq!(radius.servers.len(), 1);
    assert_eq!(radius.servers[0].key_name(), "10.11.12.13/1812/1813");
}

#[tokio::test]
async fn test_source_interface_mismatch_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .radius_set_source_interfaces(&["default".to_owned(), "mgmt".to_owned()], &[])
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_tacacs_retransmit_is_rejected() {
    let (_server, client) = setup().await;

    assert!(matches!(
        client.tacacs_set_global_retransmit(3),
        Err(Error::Validation(_))
    ));
}

// ── Logging ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_logging_source_interfaces_clear_stale_vrfs() {
    let (server, client) = setup().await;

    expect_cmds(
        &server,
        json!(["enable", "show running-config all section logging"]),
        text(&[
            "",
            "logging on\nlogging source-interface Loopback0\nlogging vrf old source-interface Ethernet9\n",
        ]),
    )
    .await;
    expect_cmds(
        &server,
        json!([
            "enable",
            "configure",
            "no logging vrf old source-interface",
            "logging source-interface Loopback1",
            "logging vrf mgmt source-interface Management1"
        ]),
        ok(json!([{}, {}, {}, {}, {}])),
    )
    .await;

    client
        .logging_set_source_interfaces(
            &["default".to_owned(), "mgmt".to_owned()],
            &["Loopback1".to_owned(), "Management1".to_owned()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logging_source_interface_mismatch_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .logging_set_source_interfaces(&["mgmt".to_owned()], &[])
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

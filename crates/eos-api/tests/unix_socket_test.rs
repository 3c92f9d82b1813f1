// Integration tests for the Unix socket transport.

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;

use eos_api::{ClientConfig, EosClient};

/// Serve `count` requests on one connection, answering each with `body`.
/// Returns the raw request texts.
async fn serve(listener: UnixListener, body: String, count: usize) -> Vec<String> {
    let (mut stream, _) = listener.accept().await.unwrap();
    let mut requests = Vec::new();

    for _ in 0..count {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed the connection early");
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(split) = text.find("\r\n\r\n") {
                let length: usize = text[..split]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= split + 4 + length {
                    break;
                }
            }
        }
        requests.push(String::from_utf8_lossy(&buf).into_owned());

        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
    }

    requests
}

#[tokio::test]
async fn test_unix_socket_round_trip_reuses_connection() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("eapi.sock");
    let listener = UnixListener::bind(&socket).unwrap();

    let body = json!({
        "jsonrpc": "2.0",
        "id": "1",
        "result": [{}, { "output": "SNMP agent disabled: no communities or users configured\n" }],
    })
    .to_string();
    let server = tokio::spawn(serve(listener, body, 2));

    let mut config = ClientConfig::new(format!("unix://{}", socket.display()));
    config.port = Some(8080);
    let client = EosClient::new(config).unwrap();
    assert!(client.target().starts_with("unix://"));

    assert!(!client.snmp_enabled().await.unwrap());
    assert!(!client.snmp_enabled().await.unwrap());

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("POST /command-api/ HTTP/1.1"));
    assert!(requests[0].contains("\"cmds\":[\"show snmp\"]"));
    assert!(!requests[0].to_ascii_lowercase().contains("authorization"));
}

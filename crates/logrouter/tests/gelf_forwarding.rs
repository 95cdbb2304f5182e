//! End to end: logfmt lines in, gzip GELF datagrams out over loopback UDP.

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use serde_json::{json, Value};
use tokio::net::UdpSocket;

use logrouter::client::{Compression, GelfEncoder, GelfUdpClient, StructuredLogger};
use logrouter::parser::{decoder_for, InputFormat, MAX_LINE_SIZE};
use logrouter::pipeline::Pipeline;

async fn recv_gelf(server: &UdpSocket) -> Value {
    let mut buf = vec![0u8; 65_536];
    let n = tokio::time::timeout(Duration::from_secs(5), server.recv(&mut buf))
        .await
        .expect("timed out waiting for datagram")
        .unwrap();

    let mut json = String::new();
    GzDecoder::new(&buf[..n]).read_to_string(&mut json).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[tokio::test]
async fn test_logfmt_lines_reach_graylog() {
    let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = server.local_addr().unwrap().port();

    let mut client = GelfUdpClient::connect(
        "127.0.0.1",
        port,
        GelfEncoder::new("router-host", Compression::Gzip),
        1420,
    )
    .await
    .unwrap();
    client.set_attr("env", "prod");
    client.set_attr("region", "us-east");

    let input: &[u8] = b"msg=\"user logged in\" level=info user=alice\n\
        level=bogus msg=ignored\n\
        msg=\"disk full\" level=crit id=42\n\
        this is not = valid \"logfmt\n";

    let mut pipeline = Pipeline::new(decoder_for(InputFormat::Logfmt, MAX_LINE_SIZE), &client);
    let stats = pipeline.run(input).await.unwrap();

    assert_eq!(stats.lines, 4);
    assert_eq!(stats.emitted, 2);
    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.decode_failures, 1);

    let first = recv_gelf(&server).await;
    assert_eq!(first["version"], json!("1.1"));
    assert_eq!(first["host"], json!("router-host"));
    assert_eq!(first["short_message"], json!("user logged in"));
    assert_eq!(first["level"], json!(6));
    assert_eq!(first["_user"], json!("alice"));
    assert_eq!(first["_level"], json!("info"));
    assert_eq!(first["_env"], json!("prod"));
    assert_eq!(first["_region"], json!("us-east"));
    assert!(first["timestamp"].is_number());

    let second = recv_gelf(&server).await;
    assert_eq!(second["short_message"], json!("disk full"));
    assert_eq!(second["level"], json!(2));
    assert_eq!(second["__id"], json!("42"));
    assert_eq!(second["_env"], json!("prod"));
}

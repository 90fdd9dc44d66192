// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use routeros_exporter::mikrotik::proto::{
    Sentence, encode_length, encode_sentence, read_length, read_sentence, read_word,
};
use routeros_exporter::mikrotik::{Client, RouterOsError};
use tokio::io::{AsyncWriteExt, DuplexStream, duplex};

#[test]
fn test_encode_length() {
    assert_eq!(encode_length(0x7F), vec![0x7F]);
    assert_eq!(encode_length(0x80), vec![0x80, 0x80]);
    assert_eq!(encode_length(0x4000 - 1), vec![0xBF, 0xFF]);
    assert_eq!(encode_length(0x4000), vec![0xC0, 0x40, 0x00]);
}

#[test]
fn test_encode_length_boundary_values() {
    // 1-byte: 0..0x80
    assert_eq!(encode_length(0).len(), 1);
    assert_eq!(encode_length(0x7F).len(), 1);

    // 2-byte: 0x80..0x4000
    assert_eq!(encode_length(0x80).len(), 2);
    assert_eq!(encode_length(0x3FFF).len(), 2);

    // 3-byte: 0x4000..0x20_0000
    assert_eq!(encode_length(0x4000).len(), 3);
    assert_eq!(encode_length(0x1F_FFFF).len(), 3);

    // 4-byte: 0x20_0000..0x1000_0000
    assert_eq!(encode_length(0x0020_0000).len(), 4);
    assert_eq!(encode_length(0x0FFF_FFFF).len(), 4);

    // 5-byte: 0x1000_0000+
    assert_eq!(encode_length(0x1000_0000), vec![0xF0, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(encode_length(0xFFFF_FFFF).len(), 5);
}

#[tokio::test]
async fn test_length_prefix_round_trip_every_class() {
    for len in [
        0u32,
        1,
        0x7F,
        0x80,
        0x3FFF,
        0x4000,
        0x1F_FFFF,
        0x20_0000,
        0x0FFF_FFFF,
        0x1000_0000,
        u32::MAX,
    ] {
        let bytes = encode_length(len);
        let mut reader = bytes.as_slice();
        assert_eq!(read_length(&mut reader).await.unwrap(), len, "{len:#x}");
        assert!(reader.is_empty(), "{len:#x}: prefix not fully consumed");
    }
}

#[tokio::test]
async fn test_reserved_prefix_bytes_rejected() {
    for first in [0xF8u8, 0xFC, 0xFF] {
        let bytes = [first, 0, 0, 0, 0];
        let mut reader = &bytes[..];
        assert!(matches!(
            read_length(&mut reader).await,
            Err(RouterOsError::InvalidLength(b)) if b == first
        ));
    }
}

#[tokio::test]
async fn test_full_words_round_trip_across_length_classes() {
    for len in [0usize, 127, 128, 16_383, 16_384, 0x20_0000] {
        let word = "a".repeat(len);
        let bytes = encode_sentence([word.as_str()]).unwrap();
        let mut reader = bytes.as_slice();
        assert_eq!(read_word(&mut reader).await.unwrap().len(), len);
        // zero-length terminator
        assert!(read_word(&mut reader).await.unwrap().is_empty());
        assert!(reader.is_empty());
    }
}

#[tokio::test]
async fn test_decode_re_sentence() {
    let bytes = encode_sentence(["!re", "=address=1.2.3.4/32"]).unwrap();
    let sentence = read_sentence(&mut bytes.as_slice()).await.unwrap();
    assert_eq!(sentence.word(), "!re");
    assert_eq!(sentence.get("address"), Some("1.2.3.4/32"));
}

#[tokio::test]
async fn test_decode_windows_1250_payload() {
    // "=name=" followed by cp1250 "Šš"
    let mut bytes = encode_sentence(["!re"]).unwrap();
    bytes.pop();
    let word = [b"=name=".as_slice(), &[0x8A, 0x9A]].concat();
    bytes.extend(encode_length(word.len() as u32));
    bytes.extend(&word);
    bytes.push(0);

    let sentence = read_sentence(&mut bytes.as_slice()).await.unwrap();
    assert_eq!(sentence.get("name"), Some("Šš"));
}

/// Fake device: answers each request in `script` with its queued sentences
/// and returns the requests it saw
fn spawn_device(
    mut device: DuplexStream,
    script: Vec<Vec<Vec<&'static str>>>,
) -> tokio::task::JoinHandle<Vec<Sentence>> {
    tokio::spawn(async move {
        let mut seen = Vec::new();
        for reply in script {
            seen.push(read_sentence(&mut device).await.unwrap());
            for sentence in reply {
                device
                    .write_all(&encode_sentence(sentence).unwrap())
                    .await
                    .unwrap();
            }
        }
        seen
    })
}

#[tokio::test]
async fn test_modern_login_sends_single_request() {
    let (client_side, device_side) = duplex(4096);
    let device = spawn_device(device_side, vec![vec![vec!["!done"]]]);

    let mut client = Client::new(client_side);
    client.login("admin", "secret").await.unwrap();
    client.close().await.unwrap();

    let requests = device.await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].word(), "/login");
    assert_eq!(requests[0].get("name"), Some("admin"));
    assert_eq!(requests[0].get("password"), Some("secret"));
}

#[tokio::test]
async fn test_legacy_login_answers_challenge() {
    let (client_side, device_side) = duplex(4096);
    let device = spawn_device(
        device_side,
        vec![vec![vec!["!done", "=ret=abc123"]], vec![vec!["!done"]]],
    );

    let mut client = Client::new(client_side);
    client.login("admin", "passTest").await.unwrap();

    let requests = device.await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].word(), "/login");
    assert_eq!(requests[1].get("name"), Some("admin"));
    assert_eq!(
        requests[1].get("response"),
        Some("0021277bff9ac7caf06aa608e46616d47f")
    );
}

#[tokio::test]
async fn test_login_rejected() {
    let (client_side, device_side) = duplex(4096);
    let _device = spawn_device(
        device_side,
        vec![vec![
            vec!["!trap", "=message=invalid user name or password (6)"],
            vec!["!done"],
        ]],
    );

    let mut client = Client::new(client_side);
    let err = client.login("admin", "wrong").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "from RouterOS device: invalid user name or password (6)"
    );
}

#[tokio::test]
async fn test_trap_then_done_keeps_partial_reply() {
    let (client_side, device_side) = duplex(4096);
    let _device = spawn_device(
        device_side,
        vec![vec![
            vec!["!re", "=name=ether1"],
            vec!["!trap", "=message=X"],
            vec!["!done"],
        ]],
    );

    let mut client = Client::new(client_side);
    let err = client.run(["/interface/print"]).await.unwrap_err();
    assert_eq!(err.to_string(), "from RouterOS device: X");
    let reply = err.reply().unwrap();
    assert_eq!(reply.rows().len(), 1);
    assert_eq!(reply.done().map(Sentence::word), Some("!done"));
}

#[tokio::test]
async fn test_fatal_stops_without_further_read() {
    let (client_side, device_side) = duplex(4096);
    // the device hangs up after !fatal; reading on would surface as Io
    let _device = spawn_device(device_side, vec![vec![vec!["!fatal", "=message=X"]]]);

    let mut client = Client::new(client_side);
    let err = client.run(["/quit"]).await.unwrap_err();
    assert!(err.to_string().contains("from RouterOS device: X"));
    assert!(matches!(err, RouterOsError::Fatal { .. }));
}

#[tokio::test]
async fn test_unknown_reply_word() {
    let (client_side, device_side) = duplex(4096);
    let _device = spawn_device(device_side, vec![vec![vec!["!xxx"]]]);

    let mut client = Client::new(client_side);
    let err = client.run(["/system/resource/print"]).await.unwrap_err();
    assert_eq!(err.to_string(), "unknown RouterOS reply word: !xxx");
}

#[tokio::test]
async fn test_close_twice_then_run_fails_fast() {
    let (client_side, _device_side) = duplex(4096);
    let mut client = Client::new(client_side);

    client.close().await.unwrap();
    client.close().await.unwrap();

    assert!(matches!(
        client.run(["/system/identity/print"]).await,
        Err(RouterOsError::Closed)
    ));
    assert!(matches!(
        client.login("admin", "").await,
        Err(RouterOsError::Closed)
    ));
}

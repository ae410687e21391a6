//! Full group/author/session/pad lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port with an API key, then exercises
//! every catalog operation over real HTTP through the default `UreqTransport`.
//! This validates request building, transport, and envelope decoding together.
//! A few tests swap the mock server for a one-shot raw socket to serve bodies
//! no well-behaved server would send.

use std::io::{Read, Write};
use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use etherpad_core::{ClientConfig, Error, EtherpadClient};

const API_KEY: &str = "integration-key";

/// Start the mock server on a background thread and return its address.
fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, Some(API_KEY.to_string())).await
        })
        .unwrap();
    });

    addr
}

/// Answer exactly one request with a 200 carrying `body` verbatim.
fn serve_once(body: Vec<u8>) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        read_request(&mut stream);
        let head = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
    });

    addr
}

/// Consume headers and a content-length body so the reply is not cut short.
fn read_request(stream: &mut std::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let length: usize = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|v| v.trim().parse().unwrap())
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn client(addr: SocketAddr) -> EtherpadClient {
    let config = ClientConfig::new(&format!("http://{addr}/api"))
        .with_api_key(API_KEY)
        .with_timeout(Duration::from_secs(5));
    EtherpadClient::new(config)
}

fn an_hour_from_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 3600
}

#[test]
fn full_lifecycle() {
    let addr = spawn_server();
    let client = client(addr);

    // Step 1: groups, with the mapper returning the same group twice.
    let group = client.create_group_if_not_exists_for("team-7").unwrap();
    let again = client.create_group_if_not_exists_for("team-7").unwrap();
    assert_eq!(group, again);
    let group_id = group.group_id.as_str();
    assert!(client.list_pads(group_id).unwrap().pad_ids.is_empty());

    // Step 2: a group pad with initial text.
    let created = client
        .create_group_pad(group_id, "notes", Some("first draft"))
        .unwrap()
        .expect("server returns the new pad ID");
    let pad_id = format!("{group_id}$notes");
    assert_eq!(created.pad_id, pad_id);
    assert_eq!(client.list_pads(group_id).unwrap().pad_ids, vec![pad_id.clone()]);

    let err = client.create_group_pad(group_id, "notes", None).unwrap_err();
    assert_eq!(err.api_message(), Some("padName does already exist"));

    // Step 3: content and revisions through the pad handle.
    let pad = client.pad(&pad_id);
    assert_eq!(pad.text(None).unwrap().text, "first draft\n");
    pad.set_text("second & <final>").unwrap();
    assert_eq!(pad.text(None).unwrap().text, "second & <final>\n");
    assert_eq!(pad.text(Some(0)).unwrap().text, "first draft\n");
    assert_eq!(pad.revisions_count().unwrap().revisions, 1);
    assert!(pad.html(None).unwrap().html.contains("second &amp; &lt;final&gt;"));

    let err = pad.text(Some(9)).unwrap_err();
    assert_eq!(
        err.api_message(),
        Some("rev is higher than the head revision of the pad")
    );

    // Step 4: metadata.
    assert_eq!(pad.users_count().unwrap().pad_users_count, 0);
    assert!(pad.read_only_id().unwrap().read_only_id.starts_with("r."));
    assert!(!pad.public_status().unwrap().public_status);
    pad.set_public_status("true").unwrap();
    assert!(pad.public_status().unwrap().public_status);
    assert!(!pad.is_password_protected().unwrap().is_password_protected);
    pad.set_password("hunter2").unwrap();
    assert!(pad.is_password_protected().unwrap().is_password_protected);
    assert!(pad.authors().unwrap().author_ids.is_empty());
    assert!(pad.last_edited().unwrap().last_edited > 0);

    // Step 5: authors and sessions.
    let author = client
        .create_author_if_not_exists_for("user-42", Some("Ada"))
        .unwrap();
    let author_id = author.author_id.as_str();
    assert!(client.list_pads_of_author(author_id).unwrap().pad_ids.is_empty());
    assert!(client.list_sessions_of_author(author_id).unwrap().is_none());

    let valid_until = an_hour_from_now();
    let session = client
        .create_session(group_id, author_id, valid_until)
        .unwrap();
    let info = client.get_session_info(&session.session_id).unwrap();
    assert_eq!(info.group_id, group_id);
    assert_eq!(info.author_id, author_id);
    assert_eq!(info.valid_until, valid_until);

    let sessions = client.list_sessions_of_group(group_id).unwrap().unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(sessions.contains_key(&session.session_id));
    let sessions = client.list_sessions_of_author(author_id).unwrap().unwrap();
    assert_eq!(sessions[&session.session_id], Some(info));

    let err = client.create_session(group_id, author_id, 1).unwrap_err();
    assert_eq!(err.api_message(), Some("validUntil is in the past"));

    client.delete_session(&session.session_id).unwrap();
    assert!(client.list_sessions_of_group(group_id).unwrap().is_none());
    let err = client.get_session_info(&session.session_id).unwrap_err();
    assert_eq!(err.api_message(), Some("sessionID does not exist"));

    // Step 6: delete the group and everything in it.
    client.delete_group(group_id).unwrap();
    let err = pad.text(None).unwrap_err();
    assert_eq!(err.api_message(), Some("padID does not exist"));
    let err = client.delete_group(group_id).unwrap_err();
    assert_eq!(err.api_message(), Some("groupID does not exist"));
}

#[test]
fn standalone_pad_lifecycle() {
    let addr = spawn_server();
    let client = client(addr);

    let author = client.create_author(None).unwrap();
    assert!(author.author_id.starts_with("a."));

    client.create_pad("standalone", None).unwrap();
    assert_eq!(
        client.get_text("standalone", None).unwrap().text,
        "Welcome to Etherpad!\n"
    );
    let err = client.create_pad("standalone", Some("again")).unwrap_err();
    assert_eq!(err.api_message(), Some("padID does already exist"));

    // Public status only exists on group pads.
    let err = client.get_public_status("standalone").unwrap_err();
    assert!(matches!(err, Error::Api { code: Some(1), .. }));

    client.delete_pad("standalone").unwrap();
    let err = client.delete_pad("standalone").unwrap_err();
    assert_eq!(err.api_message(), Some("padID does not exist"));
}

#[test]
fn wrong_api_key_is_api_error() {
    let addr = spawn_server();
    let config = ClientConfig::new(&format!("http://{addr}/api")).with_api_key("wrong");
    let client = EtherpadClient::new(config);

    let err = client.create_group().unwrap_err();
    assert!(matches!(err, Error::Api { code: Some(4), .. }));
}

#[test]
fn connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(addr);

    let err = client.create_group().unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[test]
fn validation_failure_never_reaches_server() {
    // No server at all: a request would surface as a transport error.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(addr);

    let err = client.set_public_status("p1", "maybe").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn non_utf8_body_is_protocol_error() {
    let addr = serve_once(b"{\"code\":0,\"data\":\"\xff\xfe\"}".to_vec());
    let err = client(addr).create_group().unwrap_err();
    assert!(matches!(err, Error::Protocol { .. }), "got {err:?}");
}

#[test]
fn large_body_is_read_in_full() {
    // Well past ureq's default 10 MiB body limit.
    let text = "x".repeat(12 * 1024 * 1024);
    let body = format!(r#"{{"code":0,"message":"ok","data":{{"text":"{text}"}}}}"#);
    let addr = serve_once(body.into_bytes());
    let got = client(addr).get_text("big", None).unwrap();
    assert_eq!(got.text.len(), text.len());
}

//! Integration tests for connection registration: USER, NICK and the
//! welcome sequence.

mod common;

use common::{TestClient, TestServer};
use std::time::Duration;

#[tokio::test]
async fn test_user_then_nick_sends_welcome_sequence() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut alice = TestClient::connect(&server.address(), "alice")
        .await
        .expect("Failed to connect alice");

    alice
        .send_raw("USER al 0 wonder.land :Alice Liddell")
        .await
        .unwrap();
    alice.send_raw("NICK alice").await.unwrap();

    let lines = alice.recv_until(|l| l.contains(" 422 ")).await.unwrap();
    let codes: Vec<&str> = lines
        .iter()
        .map(|l| l.split(' ').nth(1).unwrap_or(""))
        .collect();
    assert_eq!(codes, vec!["001", "002", "003", "004", "422"]);

    for line in &lines {
        assert!(line.starts_with(":irc.test "), "unexpected prefix: {line}");
        assert_eq!(line.split(' ').nth(2), Some("alice"), "not addressed to alice: {line}");
    }
    assert!(lines[0].ends_with("alice!al@wonder.land"));
}

#[tokio::test]
async fn test_concurrent_nick_claims_one_winner() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut c1 = TestClient::connect(&server.address(), "bob").await.unwrap();
    let mut c2 = TestClient::connect(&server.address(), "bob").await.unwrap();

    let (r1, r2) = tokio::join!(c1.send_raw("NICK bob"), c2.send_raw("NICK bob"));
    r1.unwrap();
    r2.unwrap();

    let first1 = c1.recv().await.unwrap();
    let first2 = c2.recv().await.unwrap();

    let won = |l: &str| l.contains(" 001 bob ");
    let lost = |l: &str| l == ":irc.test 433 * bob :Nickname is already in use";
    assert!(
        (won(first1.as_str()) && lost(first2.as_str()))
            || (lost(first1.as_str()) && won(first2.as_str())),
        "expected one winner: {first1:?} / {first2:?}"
    );
}

#[tokio::test]
async fn test_nick_freed_after_disconnect() {
    let server = TestServer::spawn().await.unwrap();
    let mut first = TestClient::connect(&server.address(), "carol").await.unwrap();
    first.register().await.unwrap();
    drop(first);

    // The disconnect is processed asynchronously; retry until the name frees.
    let mut second = TestClient::connect(&server.address(), "carol").await.unwrap();
    for _ in 0..50 {
        second.send_raw("NICK carol").await.unwrap();
        let line = second.recv().await.unwrap();
        if line.contains(" 001 ") {
            return;
        }
        assert!(line.contains(" 433 "), "unexpected reply: {line}");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("nickname was never released");
}

#[tokio::test]
async fn test_user_arity_error_keeps_connection() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = TestClient::connect(&server.address(), "dave").await.unwrap();

    client.send_raw("USER dave 0").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap(),
        ":irc.test 461 * USER :Not enough parameters"
    );

    client.register().await.expect("connection should still be usable");
}

#[tokio::test]
async fn test_unknown_command_goes_to_sender_only() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = TestClient::connect(&server.address(), "alice").await.unwrap();
    let mut bob = TestClient::connect(&server.address(), "bob").await.unwrap();
    alice.register().await.unwrap();
    bob.register().await.unwrap();

    alice.send_raw("FROBNICATE now please").await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap(),
        ":irc.test 421 alice FROBNICATE :Unknown command"
    );
    bob.expect_silence(Duration::from_millis(200)).await.unwrap();
}

#[tokio::test]
async fn test_ping_pong() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = TestClient::connect(&server.address(), "erin").await.unwrap();

    client.send_raw("PING :12345").await.unwrap();
    assert_eq!(client.recv().await.unwrap(), "PONG irc.test :12345");
}

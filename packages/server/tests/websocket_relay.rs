//! WebSocket relay integration tests.
//!
//! Drive a real server with tokio-tungstenite clients.

mod fixtures;

use std::time::Duration;

use fixtures::{TIMEOUT, TestClient, TestServer};
use serde_json::json;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite};

const SILENCE: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_session_init_is_first_frame() {
    // テスト項目: 接続直後に session_init が届き、ID は接続ごとに異なる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let alice = TestClient::connect(&server).await;
    let bob = TestClient::connect(&server).await;

    // then (期待する結果): connect() が session_init を検証済み
    assert!(!alice.session_id.is_empty());
    assert_ne!(alice.session_id, bob.session_id);
}

#[tokio::test]
async fn test_caption_reaches_active_viewer() {
    // テスト項目: A が fr-FR で開始し、アクティブな B が A の字幕を受け取る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = TestClient::connect(&server).await;
    let mut b = TestClient::connect(&server).await;
    b.start_listening(None).await;

    // when (操作):
    let started = a.start_listening(Some("fr-FR")).await;
    a.send_json(json!({"type": "subtitle_update", "text": "bonjour"}))
        .await;

    // then (期待する結果):
    assert_eq!(started["language"], "fr-FR");
    assert!(started["timestamp"].is_i64());

    let caption = b.recv_json().await;
    assert_eq!(caption["type"], "subtitle_update");
    assert_eq!(caption["text"], "bonjour");
    assert_eq!(caption["sessionId"], a.session_id.as_str());
    assert!(caption["serverTimestamp"].is_i64());

    // 送信者自身には届かない
    a.expect_silence(SILENCE).await;
}

#[tokio::test]
async fn test_caption_skips_inactive_and_stopped_sessions() {
    // テスト項目: 非アクティブ・停止済みのセッションには配信されない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut speaker = TestClient::connect(&server).await;
    let mut idle = TestClient::connect(&server).await;
    let mut stopped = TestClient::connect(&server).await;
    speaker.start_listening(None).await;
    stopped.start_listening(None).await;
    stopped.send_json(json!({"type": "stop_listening"})).await;
    assert_eq!(stopped.recv_json().await["type"], "listening_stopped");

    // when (操作):
    speaker
        .send_json(json!({"type": "subtitle_update", "text": "hello"}))
        .await;

    // then (期待する結果):
    idle.expect_silence(SILENCE).await;
    stopped.expect_silence(SILENCE).await;
}

#[tokio::test]
async fn test_inactive_sender_still_broadcasts() {
    // テスト項目: subtitle_update は送信者の状態に依存せず配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut sender = TestClient::connect(&server).await;
    let mut viewer = TestClient::connect(&server).await;
    viewer.start_listening(None).await;

    // when (操作):
    sender
        .send_json(json!({"type": "subtitle_update", "text": "hi", "isFinal": false}))
        .await;

    // then (期待する結果):
    let caption = viewer.recv_json().await;
    assert_eq!(caption["text"], "hi");
    assert_eq!(caption["isFinal"], false);
}

#[tokio::test]
async fn test_unknown_type_then_ping() {
    // テスト項目: 未知の type には error が返り、接続は維持され ping も成功する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(&server).await;

    // when (操作):
    client.send_json(json!({"type": "foo"})).await;
    let error = client.recv_json().await;
    let sent_at = jimaku_shared::time::now_millis();
    client
        .send_json(json!({"type": "ping", "timestamp": sent_at}))
        .await;
    let pong = client.recv_json().await;

    // then (期待する結果):
    assert_eq!(
        error,
        json!({"type": "error", "message": "Unknown message type: foo"})
    );
    assert_eq!(pong["type"], "pong");
    assert!(pong["latency"].as_i64().unwrap() >= 0);
    assert!(pong["timestamp"].as_i64().unwrap() >= sent_at);
}

#[tokio::test]
async fn test_malformed_frames() {
    // テスト項目: デコードできないテキスト・バイナリフレームには Invalid message format が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(&server).await;

    // when (操作):
    client.send_text("this is not json").await;
    let text_error = client.recv_json().await;
    client.send_binary(vec![0xff, 0xfe, 0xfd]).await;
    let binary_error = client.recv_json().await;

    // then (期待する結果):
    let expected = json!({"type": "error", "message": "Invalid message format"});
    assert_eq!(text_error, expected);
    assert_eq!(binary_error, expected);
    server.wait_for_session_count(1).await;
}

#[tokio::test]
async fn test_binary_json_frame_is_routed() {
    // テスト項目: UTF-8 の JSON を含むバイナリフレームも処理される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = TestClient::connect(&server).await;

    // when (操作):
    client
        .send_binary(br#"{"type":"start_listening","language":"de-DE"}"#.to_vec())
        .await;

    // then (期待する結果):
    let reply = client.recv_json().await;
    assert_eq!(reply["type"], "listening_started");
    assert_eq!(reply["language"], "de-DE");
}

#[tokio::test]
async fn test_disconnected_viewer_does_not_break_relay() {
    // テスト項目: 切断した視聴者がいても残りの視聴者には配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut speaker = TestClient::connect(&server).await;
    let mut gone = TestClient::connect(&server).await;
    let mut viewer = TestClient::connect(&server).await;
    gone.start_listening(None).await;
    viewer.start_listening(None).await;
    gone.close().await;
    server.wait_for_session_count(2).await;

    // when (操作):
    speaker
        .send_json(json!({"type": "subtitle_update", "text": "still here"}))
        .await;

    // then (期待する結果):
    assert_eq!(viewer.recv_json().await["text"], "still here");
    speaker
        .send_json(json!({"type": "ping", "timestamp": 0}))
        .await;
    assert_eq!(speaker.recv_json().await["type"], "pong");
}

#[tokio::test]
async fn test_graceful_shutdown_notifies_and_closes() {
    // テスト項目: 停止時に全セッションへ server_shutdown が届き、接続が閉じられる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    bob.start_listening(None).await;

    // when (操作):
    let shutdown = tokio::spawn(server.shutdown());

    // then (期待する結果):
    for client in [&mut alice, &mut bob] {
        let notice = client.recv_json().await;
        assert_eq!(
            notice,
            json!({"type": "server_shutdown", "message": "Server is shutting down"})
        );
        assert!(client.wait_for_close().await);
    }
    shutdown.await.expect("Shutdown task panicked");
}

#[tokio::test]
async fn test_connection_during_shutdown_grace_is_refused() {
    // テスト項目: 停止処理の猶予中に来た接続は 503 で拒否される
    // given (前提条件):
    let mut server = TestServer::start_with_grace(Duration::from_millis(500)).await;
    let mut alice = TestClient::connect(&server).await;

    // when (操作): 停止を開始し、alice への通知を確認してから新しく接続する
    server.trigger_shutdown();
    let notice = alice.recv_json().await;
    assert_eq!(notice["type"], "server_shutdown");
    let late = timeout(TIMEOUT, connect_async(server.ws_url()))
        .await
        .expect("Connect timed out");

    // then (期待する結果):
    match late {
        Err(tungstenite::Error::Http(response)) => {
            assert_eq!(response.status().as_u16(), 503);
        }
        Ok(_) => panic!("Upgrade was accepted during shutdown"),
        Err(e) => panic!("Unexpected connect error: {e}"),
    }
    assert!(alice.wait_for_close().await);
}

//! Tests for the REST client against a live server.

use reqwest::StatusCode;
use tictac_engine::Player;
use tictac_server::{ApiFailure, GameStore, RestGameClient, serve};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    client: RestGameClient,
    store: GameStore,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store = GameStore::new();
        let (stop, stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve(listener, store.clone(), async move {
            let _ = stopped.await;
        }));

        // Trailing slash is trimmed by the client.
        let client = RestGameClient::new(format!("http://{addr}/"));
        Self {
            client,
            store,
            stop,
            handle,
        }
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.handle.await.unwrap().unwrap();
    }
}

fn failure(err: &anyhow::Error) -> &ApiFailure {
    err.downcast_ref::<ApiFailure>()
        .unwrap_or_else(|| panic!("expected an API failure, got {err:#}"))
}

#[tokio::test]
async fn test_client_plays_a_game() {
    let server = TestServer::start().await;
    let client = &server.client;

    let game = client.create_game().await.unwrap();
    assert_eq!(game.board, [None; 9]);
    assert_eq!(game.status, "waiting for move");

    let id = game.id.to_string();
    let moves = [(0, "X"), (3, "O"), (1, "X"), (4, "O"), (2, "X")];
    let mut last = game;
    for (index, player) in moves {
        last = client.make_move(&id, index, player).await.unwrap();
    }
    assert_eq!(last.winner, Some(Player::X));
    assert_eq!(last.status, "X wins");

    let fetched = client.get_game(&id).await.unwrap();
    assert_eq!(fetched, last);
    assert_eq!(server.store.len().await, 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_client_surfaces_rejections() {
    let server = TestServer::start().await;
    let client = &server.client;
    let id = client.create_game().await.unwrap().id.to_string();

    let err = client.make_move(&id, 9, "X").await.unwrap_err();
    let rejection = failure(&err);
    assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
    assert!(rejection.detail.starts_with("Index must be in range"));

    client.make_move(&id, 4, "O").await.unwrap();
    let err = client.make_move(&id, 4, "X").await.unwrap_err();
    assert!(failure(&err).detail.starts_with("Cell already occupied"));

    let err = client.make_move(&id, 5, "Z").await.unwrap_err();
    assert!(failure(&err).detail.starts_with("Invalid player"));

    let err = client.get_game("missing").await.unwrap_err();
    let rejection = failure(&err);
    assert_eq!(rejection.status, StatusCode::NOT_FOUND);
    assert_eq!(rejection.detail, "Game not found.");

    server.shutdown().await;
}

#[tokio::test]
async fn test_client_delete() {
    let server = TestServer::start().await;
    let client = &server.client;
    let id = client.create_game().await.unwrap().id.to_string();

    assert!(client.delete_game(&id).await.unwrap());
    assert!(!client.delete_game(&id).await.unwrap());
    assert!(server.store.is_empty().await);

    let err = client.get_game(&id).await.unwrap_err();
    assert_eq!(failure(&err).status, StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test]
async fn test_client_reports_truncated_error_body() {
    // A server that promises more error body than it sends, then hangs up.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 400 Bad Request\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"detail\":")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = RestGameClient::new(format!("http://{addr}"));
    let err = client.create_game().await.unwrap_err();
    assert!(err.downcast_ref::<ApiFailure>().is_none());
    assert!(err.to_string().contains("Failed to read error body"), "got {err:#}");

    server.await.unwrap();
}

#[tokio::test]
async fn test_client_reports_unreachable_server() {
    // Bind and immediately drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let client = RestGameClient::new(format!("http://{addr}"));

    let err = client.create_game().await.unwrap_err();
    assert!(err.downcast_ref::<ApiFailure>().is_none());
    assert!(err.to_string().contains("Failed to reach game server"));
}

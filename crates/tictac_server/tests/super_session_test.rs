//! Super tic-tac-toe played against a live server.

use tictac_engine::{Outcome, Player};
use tictac_server::{GameStore, RestGameClient, SuperMoveError, SuperSession, serve};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// X takes the top row of sub-games: bottom row of board 0, middle row of
/// board 1, bottom row of board 2. O's replies steer X back each time.
const TOP_ROW_WIN: [(usize, i64); 17] = [
    (0, 6),
    (6, 0),
    (0, 7),
    (7, 0),
    (0, 8),
    (8, 1),
    (1, 3),
    (3, 1),
    (1, 4),
    (4, 1),
    (1, 5),
    (5, 2),
    (2, 6),
    (6, 2),
    (2, 7),
    (7, 2),
    (2, 8),
];

async fn start_server() -> (RestGameClient, GameStore, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let store = GameStore::new();
    let (stop, stopped) = oneshot::channel::<()>();
    tokio::spawn(serve(listener, store.clone(), async move {
        let _ = stopped.await;
    }));
    (RestGameClient::new(format!("http://{addr}")), store, stop)
}

#[tokio::test]
async fn test_super_game_main_row_win() {
    let (client, store, stop) = start_server().await;
    let mut session = SuperSession::start(client).await.unwrap();
    assert_eq!(store.len().await, 9);

    for (n, (board, cell)) in TOP_ROW_WIN.iter().enumerate() {
        let expected = if n % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(session.state().current_player(), expected, "move {n}");
        let game = session.play(*board, *cell).await.unwrap();
        assert_eq!(game.board[*cell as usize], Some(expected));
    }

    let state = session.state();
    assert_eq!(state.outcome(), Some(Outcome::Winner(Player::X)));
    assert_eq!(state.status().to_string(), "X wins");
    assert_eq!(&state.main_board()[..3], &[Some(Outcome::Winner(Player::X)); 3]);
    assert!(state.main_board()[3..].iter().all(Option::is_none));
    assert!(state.legal_boards().is_empty());
    assert!(session.to_string().ends_with("Super game: X wins"));

    let err = session.play(4, 4).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<SuperMoveError>(), Some(SuperMoveError::GameOver(_))));

    session.finish().await.unwrap();
    assert!(store.is_empty().await);
    let _ = stop.send(());
}

#[tokio::test]
async fn test_super_game_enforces_routing() {
    let (client, _store, stop) = start_server().await;
    let mut session = SuperSession::start(client).await.unwrap();

    session.play(0, 4).await.unwrap();
    assert_eq!(session.state().legal_boards(), &[4]);
    assert_eq!(session.state().current_player(), Player::O);

    // Routed elsewhere: refused before any request is sent.
    let err = session.play(3, 0).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<SuperMoveError>(),
        Some(&SuperMoveError::BoardNotPlayable { board: 3, legal: vec![4] })
    );
    assert!(session.games()[3].board.iter().all(Option::is_none));

    // Refused by the server: nothing changes, O still to move.
    let before = session.state().clone();
    assert!(session.play(4, 9).await.is_err());
    assert_eq!(session.state(), &before);

    session.play(4, 0).await.unwrap();
    assert_eq!(session.state().legal_boards(), &[0]);
    assert_eq!(session.state().current_player(), Player::X);

    let rendered = session.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[1], ". X . | . . . | . . .");
    assert_eq!(lines[3], "------+-------+------");
    assert_eq!(lines[4], ". . . | O . . | . . .");
    assert!(rendered.ends_with("X to play on board(s) [0]"));

    session.finish().await.unwrap();
    let _ = stop.send(());
}

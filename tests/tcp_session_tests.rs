use armada::{AutoPlayer, Board, Player, Role, Session, SessionOutcome, TcpTransport};
use rand::{rngs::SmallRng, SeedableRng};
use tokio::net::TcpListener;

#[tokio::test(flavor = "multi_thread")]
async fn auto_vs_auto_over_loopback_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let host = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let transport = TcpTransport::new(stream);

        let mut rng = SmallRng::seed_from_u64(100);
        let mut player = AutoPlayer::new();
        let mut board = Board::new();
        player.place_ships(&mut rng, &mut board).unwrap();

        let mut session = Session::new(Role::Host, board, Box::new(player), transport);
        session.run(&mut rng).await.unwrap()
    });

    let guest = tokio::spawn(async move {
        let transport = TcpTransport::connect(addr).await.unwrap();

        let mut rng = SmallRng::seed_from_u64(200);
        let mut player = AutoPlayer::new();
        let mut board = Board::new();
        player.place_ships(&mut rng, &mut board).unwrap();

        let mut session = Session::new(Role::Guest, board, Box::new(player), transport);
        session.run(&mut rng).await.unwrap()
    });

    let (host_outcome, guest_outcome) = tokio::try_join!(host, guest)?;

    // one side wins, the other loses
    assert!(
        (host_outcome == SessionOutcome::Victory && guest_outcome == SessionOutcome::Defeat)
            || (host_outcome == SessionOutcome::Defeat && guest_outcome == SessionOutcome::Victory),
        "got {:?} / {:?}",
        host_outcome,
        guest_outcome
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn guest_sees_peer_quit_when_host_disconnects_cleanly() -> anyhow::Result<()> {
    use armada::transport::Transport;
    use armada::Message;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let host = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut transport = TcpTransport::new(stream);
        transport.send(Message::Ready { commitment: 3 }).await.unwrap();
        // read the guest's READY, then leave politely
        let _ = transport.recv().await.unwrap();
        transport.send(Message::Quit).await.unwrap();
    });

    let transport = TcpTransport::connect(addr).await?;
    let mut rng = SmallRng::seed_from_u64(300);
    let mut player = AutoPlayer::new();
    let mut board = Board::new();
    player.place_ships(&mut rng, &mut board)?;

    let mut session = Session::new(Role::Guest, board, Box::new(player), transport);
    let outcome = session.run(&mut rng).await?;

    // guest was waiting for the host's first bomb
    assert_eq!(outcome, SessionOutcome::PeerQuit);
    host.await?;
    Ok(())
}

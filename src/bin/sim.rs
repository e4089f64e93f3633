use armada::transport::stream::WireTransport;
use armada::{AutoPlayer, Board, Player, Role, Session};
use rand::{rngs::SmallRng, SeedableRng};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut p1 = AutoPlayer::new();
    let mut p2 = AutoPlayer::new();
    let mut b1 = Board::new();
    let mut b2 = Board::new();
    p1.place_ships(&mut rng1, &mut b1)?;
    p2.place_ships(&mut rng2, &mut b2)?;

    let (t1, t2) = WireTransport::pair();

    let host = async move {
        let mut session = Session::new(Role::Host, b1, Box::new(p1), t1);
        let outcome = session.run(&mut rng1).await?;
        Ok::<_, anyhow::Error>((outcome, session.enemy_cells_remaining()))
    };

    let guest = async move {
        let mut session = Session::new(Role::Guest, b2, Box::new(p2), t2);
        let outcome = session.run(&mut rng2).await?;
        Ok::<_, anyhow::Error>((outcome, session.enemy_cells_remaining()))
    };

    let (host_res, guest_res) = tokio::try_join!(host, guest)?;

    println!("host:  {:?} ({} enemy cells left)", host_res.0, host_res.1);
    println!("guest: {:?} ({} enemy cells left)", guest_res.0, guest_res.1);
    Ok(())
}

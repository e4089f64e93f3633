#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use armada::transport::stream::WireTransport;
#[cfg(feature = "std")]
use armada::{init_logging, AutoPlayer, Board, CliPlayer, Player, Role, Session, DEFAULT_PORT};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::time::Duration;
#[cfg(feature = "std")]
use tokio::net::{TcpListener, TcpStream};

#[derive(Parser)]
#[command(author, version, about = "Two-player fleet battle over TCP", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Log wire traffic and state transitions.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
#[cfg(feature = "std")]
enum PlayerKind {
    Human,
    Auto,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Listen for one peer and play as host. The host bombs first.
    Host {
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        player: PlayerKind,
        #[arg(long, help = "Fix RNG seed for reproducible games")]
        seed: Option<u64>,
        #[arg(long, help = "Abort if the peer stays silent this many seconds")]
        read_timeout: Option<u64>,
    },
    /// Connect to a host and play as guest.
    Join {
        /// Host to connect to, `addr` or `addr:port`.
        addr: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        player: PlayerKind,
        #[arg(long, help = "Fix RNG seed for reproducible games")]
        seed: Option<u64>,
        #[arg(long, help = "Abort if the peer stays silent this many seconds")]
        read_timeout: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn make_player(kind: &PlayerKind) -> Box<dyn Player + Send> {
    match kind {
        PlayerKind::Human => Box::new(CliPlayer::new()),
        PlayerKind::Auto => Box::new(AutoPlayer::new()),
    }
}

#[cfg(feature = "std")]
fn make_transport(stream: TcpStream, read_timeout: Option<u64>) -> WireTransport<TcpStream> {
    match read_timeout {
        Some(secs) => WireTransport::with_read_timeout(stream, Duration::from_secs(secs)),
        None => WireTransport::new(stream),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Host { bind, port, player, seed, read_timeout } => {
            let mut rng = make_rng(seed);
            let mut player = make_player(&player);
            let mut board = Board::new();
            player.place_ships(&mut rng, &mut board)?;

            let listener = TcpListener::bind((bind.as_str(), port)).await?;
            println!("Waiting for a peer on {}...", listener.local_addr()?);
            let (stream, peer_addr) = listener.accept().await?;
            println!("Peer connected from {}", peer_addr);

            let transport = make_transport(stream, read_timeout);
            let mut session = Session::new(Role::Host, board, player, transport);
            let outcome = session.run(&mut rng).await?;
            println!("{}", outcome);
        }
        Commands::Join { addr, port, player, seed, read_timeout } => {
            let mut rng = make_rng(seed);
            let mut player = make_player(&player);
            let mut board = Board::new();
            player.place_ships(&mut rng, &mut board)?;

            let target = if addr.contains(':') {
                addr
            } else {
                format!("{}:{}", addr, port)
            };
            println!("Connecting to {}...", target);
            let stream = TcpStream::connect(target.as_str()).await?;
            println!("Connected.");

            let transport = make_transport(stream, read_timeout);
            let mut session = Session::new(Role::Guest, board, player, transport);
            let outcome = session.run(&mut rng).await?;
            println!("{}", outcome);
        }
    }
    Ok(())
}

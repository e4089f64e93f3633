use tokio::net::{TcpStream, ToSocketAddrs};

use crate::transport::stream::WireTransport;

/// The game's real transport: the wire codec over one TCP connection.
pub type TcpTransport = WireTransport<TcpStream>;

impl WireTransport<TcpStream> {
    /// Resolve `addr` (literal address or hostname) and connect.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

//! Message transport over any async byte stream.
//!
//! The wire format has no outer length prefix, so receiving works in
//! stages: one tag byte, then the kind's fixed header, then the declared
//! text payload. Each stage is an exact read; a stream that closes
//! mid-message surfaces as a transport failure, never as a silently
//! truncated message.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream};
use tokio::time::timeout;

use crate::config::MAX_MESSAGE_LEN;
use crate::transport::Transport;
use crate::wire::{Message, MessageKind, MAX_HEADER_LEN};

pub struct WireTransport<S> {
    stream: S,
    read_timeout: Option<Duration>,
}

impl<S> WireTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + Sync,
{
    /// Wrap a connected stream. Reads block indefinitely, matching the
    /// reference behavior of the protocol.
    pub fn new(stream: S) -> Self {
        Self { stream, read_timeout: None }
    }

    /// Wrap a connected stream with a bound on how long a single
    /// message read may take. Hardening option; off by default.
    pub fn with_read_timeout(stream: S, read_timeout: Duration) -> Self {
        Self { stream, read_timeout: Some(read_timeout) }
    }

    async fn read_message(&mut self) -> anyhow::Result<Message> {
        let mut tag = [0u8; 1];
        self.stream.read_exact(&mut tag).await.map_err(read_failure)?;
        let kind = MessageKind::from_tag(tag[0]).map_err(anyhow::Error::new)?;

        let mut header = [0u8; MAX_HEADER_LEN];
        let header = &mut header[..kind.header_len()];
        self.stream.read_exact(header).await.map_err(read_failure)?;

        let text_len = kind.text_len(header).map_err(anyhow::Error::new)?;
        let mut text = vec![0u8; text_len];
        self.stream.read_exact(&mut text).await.map_err(read_failure)?;

        Message::assemble(kind, header, &text).map_err(anyhow::Error::new)
    }
}

impl WireTransport<DuplexStream> {
    /// Connected in-memory pair, for tests and local simulations.
    pub fn pair() -> (Self, Self) {
        let (a, b) = tokio::io::duplex(4 * MAX_MESSAGE_LEN);
        (Self::new(a), Self::new(b))
    }
}

fn read_failure(e: io::Error) -> anyhow::Error {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => anyhow::anyhow!("connection closed by peer"),
        io::ErrorKind::ConnectionReset => anyhow::anyhow!("connection reset by peer"),
        _ => anyhow::anyhow!("read error: {}", e),
    }
}

#[async_trait::async_trait]
impl<S> Transport for WireTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + Sync,
{
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let bytes = msg.encode().map_err(anyhow::Error::new)?;
        log::debug!("send {:?} ({} bytes)", msg.kind(), bytes.len());
        self.stream.write_all(&bytes).await.map_err(|e| {
            if matches!(e.kind(), io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset) {
                anyhow::anyhow!("connection closed by peer")
            } else {
                anyhow::anyhow!("write error: {}", e)
            }
        })?;
        self.stream.flush().await.map_err(|e| anyhow::anyhow!("write error: {}", e))?;
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let msg = match self.read_timeout {
            Some(limit) => timeout(limit, self.read_message())
                .await
                .map_err(|_| anyhow::anyhow!("receive timeout after {:?}", limit))??,
            None => self.read_message().await?,
        };
        log::debug!("recv {:?}", msg.kind());
        Ok(msg)
    }
}

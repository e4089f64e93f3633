use crate::wire::Message;

/// One duplex message channel to the peer. Implementations own the
/// framing; callers only see whole messages.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod stream;
pub mod tcp;

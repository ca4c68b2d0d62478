mod client;
mod codec;
mod config;
mod connection;

use async_trait::async_trait;
use pixelfx::Frame;
use thiserror::Error;
use tokio::sync::Mutex;

pub use client::OpcClient;
pub use codec::{
    decode, encode, encode_raw, Packet, CMD_SET_PIXEL_COLORS, CMD_SYSTEM_EXCLUSIVE, HEADER_LEN,
    MAX_PAYLOAD, MAX_PIXELS,
};
pub use config::ClientConfig;
pub use connection::{ConnectionManager, ConnectionStatus};

/// Identifier of an output group on the server. Channel 0 is broadcast.
pub type Channel = u8;

/// Packets sent to this channel apply to all channels on the server.
pub const BROADCAST: Channel = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpcError {
    #[error("frame payload of {bytes} bytes does not fit in a single packet")]
    InvalidFrame { bytes: usize },
    #[error("failed to connect: {reason}")]
    ConnectFailed { reason: String },
    #[error("connection lost: {reason}")]
    ConnectionLost { reason: String },
    #[error("client is closed")]
    Closed,
    #[error("malformed packet: {reason}")]
    MalformedPacket { reason: String },
}

#[async_trait]
pub trait FrameSink {
    async fn put_frame(&self, channel: Channel, frame: &Frame) -> Result<(), OpcError>;
}

/// Records submitted frames instead of transmitting them. Intended for
/// testing animation producers without a live server.
#[derive(Default)]
pub struct MockFrameSink {
    frames: Mutex<Vec<(Channel, Frame)>>,
}

impl MockFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn frames(&self) -> Vec<(Channel, Frame)> {
        self.frames.lock().await.clone()
    }
}

#[async_trait]
impl FrameSink for MockFrameSink {
    async fn put_frame(&self, channel: Channel, frame: &Frame) -> Result<(), OpcError> {
        self.frames.lock().await.push((channel, frame.clone()));
        Ok(())
    }
}

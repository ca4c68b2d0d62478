use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use pixelfx::Frame;

use crate::{
    codec,
    config::ClientConfig,
    connection::{ConnectionManager, ConnectionStatus},
    Channel, FrameSink, OpcError, BROADCAST,
};

/// Application-facing OPC client. Owns the connection to one server;
/// construction does not block on connecting.
///
/// Transmission failures are returned, never raised: an animation loop
/// that ignores the result simply skips a visual frame, and the first
/// call after the server comes back reconnects transparently.
pub struct OpcClient {
    connection: ConnectionManager,
}

impl OpcClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            connection: ConnectionManager::new(endpoint),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            connection: ConnectionManager::new(&config.endpoint)
                .with_connect_timeout(config.connect_timeout())
                .with_write_timeout(config.write_timeout()),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connection = self.connection.with_connect_timeout(timeout);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.connection = self.connection.with_write_timeout(timeout);
        self
    }

    /// Sends a frame to all channels (channel 0, broadcast).
    pub async fn put_pixels(&self, frame: &Frame) -> Result<(), OpcError> {
        self.put_pixels_on(BROADCAST, frame).await
    }

    /// Sends a frame to one output channel.
    pub async fn put_pixels_on(&self, channel: Channel, frame: &Frame) -> Result<(), OpcError> {
        debug!("Sending {} pixels to channel {}", frame.len(), channel);
        let packet = codec::encode(channel, frame)?;
        self.connection.send(packet).await
    }

    /// Frames and sends an arbitrary command, e.g. firmware configuration.
    pub async fn send_raw(
        &self,
        channel: Channel,
        command: u8,
        payload: &[u8],
    ) -> Result<(), OpcError> {
        let packet = codec::encode_raw(channel, command, payload)?;
        self.connection.send(packet).await
    }

    /// Releases the connection. Idempotent; later sends fail with
    /// [`OpcError::Closed`].
    pub async fn close(&self) {
        self.connection.close().await;
    }

    pub async fn status(&self) -> ConnectionStatus {
        self.connection.status().await
    }
}

#[async_trait]
impl FrameSink for OpcClient {
    async fn put_frame(&self, channel: Channel, frame: &Frame) -> Result<(), OpcError> {
        self.put_pixels_on(channel, frame).await
    }
}

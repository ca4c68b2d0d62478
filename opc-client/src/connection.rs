use std::{io::Cursor, time::Duration};

use bytes::{Buf, Bytes};
use futures_util::TryFutureExt;
use log::{debug, error, info};
use tokio::{io::AsyncWriteExt, net::TcpStream, sync::Mutex};

use crate::OpcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
    Closed,
}

struct TransportSlot {
    stream: Option<TcpStream>,
    closed: bool,
}

/// Maintains the single stream connection to one OPC server and delivers
/// encoded packets in submission order.
///
/// The connection is established lazily: a `send` on a disconnected
/// manager makes exactly one connect attempt and fails the call if it
/// does not succeed. Failed frames are never buffered, since a stale
/// animation frame is worse than a dropped one; the caller's frame loop
/// provides the retry cadence.
pub struct ConnectionManager {
    addr: String,
    transport: Mutex<TransportSlot>,
    connect_timeout: Duration,
    write_timeout: Duration,
}

impl ConnectionManager {
    pub fn new(endpoint: &str) -> Self {
        let addr = endpoint
            .strip_prefix("opc://")
            .or_else(|| endpoint.strip_prefix("tcp://"))
            .unwrap_or(endpoint);
        Self {
            addr: addr.to_owned(),
            transport: Mutex::new(TransportSlot {
                stream: None,
                closed: false,
            }),
            connect_timeout: Duration::from_secs(1),
            write_timeout: Duration::from_secs(1),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn establish(&self) -> Result<TcpStream, OpcError> {
        debug!("Connecting to OPC server at {}", self.addr);
        let connect = TcpStream::connect(&self.addr).and_then(|s| async {
            s.set_nodelay(true)?;
            Ok(s)
        });
        match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(stream)) => {
                info!("Successfully connected to OPC server at {}", self.addr);
                Ok(stream)
            }
            Ok(Err(e)) => Err(OpcError::ConnectFailed {
                reason: e.to_string(),
            }),
            Err(_) => Err(OpcError::ConnectFailed {
                reason: "Timeout".into(),
            }),
        }
    }

    /// Establishes the connection ahead of the first `send`. Optional;
    /// a single attempt, same as the implicit reconnect.
    pub async fn connect(&self) -> Result<(), OpcError> {
        let mut transport = self.transport.lock().await;
        if transport.closed {
            return Err(OpcError::Closed);
        }
        if transport.stream.is_none() {
            transport.stream = Some(self.establish().await?);
        }
        Ok(())
    }

    /// Writes one encoded packet to the server, connecting first if
    /// necessary. On any failure the transport is dropped and the next
    /// call starts from a fresh connect attempt.
    pub async fn send(&self, packet: Bytes) -> Result<(), OpcError> {
        let mut transport = self.transport.lock().await;
        if transport.closed {
            return Err(OpcError::Closed);
        }

        let stream = if let Some(ref mut stream) = transport.stream {
            stream
        } else {
            transport.stream = Some(self.establish().await?);
            transport.stream.as_mut().unwrap()
        };

        let mut buf = Cursor::new(packet);
        let result = tokio::time::timeout(self.write_timeout, stream.write_all_buf(&mut buf)).await;
        if buf.remaining() != 0 && buf.remaining() != buf.get_ref().len() {
            error!(
                "Write failed, {} out of {} bytes were not written",
                buf.remaining(),
                buf.get_ref().len()
            );
        }

        match result {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => {
                transport.stream = None;
                Err(OpcError::ConnectionLost {
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                transport.stream = None;
                Err(OpcError::ConnectionLost {
                    reason: "Timeout".into(),
                })
            }
        }
    }

    /// Releases the transport. Subsequent `send` calls fail with
    /// [`OpcError::Closed`]. Safe to call more than once.
    pub async fn close(&self) {
        let mut transport = self.transport.lock().await;
        if transport.closed {
            return;
        }
        if let Some(mut stream) = transport.stream.take() {
            let _ = stream.shutdown().await;
        }
        transport.closed = true;
        debug!("Closed connection to OPC server at {}", self.addr);
    }

    pub async fn status(&self) -> ConnectionStatus {
        let transport = self.transport.lock().await;
        if transport.closed {
            ConnectionStatus::Closed
        } else if transport.stream.is_some() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }
}

//! Live — GELF over UDP implementation of [`StructuredLogger`].
//!
//! The socket is connected once at startup and closed when the client is
//! dropped.

use std::net::SocketAddr;

use chrono::Utc;
use tokio::net::{lookup_host, UdpSocket};
use tracing::debug;

use crate::client::chunk::{self, MessageIds};
use crate::client::error::TransportError;
use crate::client::gelf::GelfEncoder;
use crate::client::logger::{EmitFuture, StructuredLogger};
use crate::parser::Fields;
use crate::record::Severity;

pub struct GelfUdpClient {
    socket: UdpSocket,
    peer: SocketAddr,
    encoder: GelfEncoder,
    chunk_size: usize,
    ids: MessageIds,
}

impl GelfUdpClient {
    /// Resolve `address:port` and connect a UDP socket to it.
    pub async fn connect(
        address: &str,
        port: u16,
        encoder: GelfEncoder,
        chunk_size: usize,
    ) -> Result<Self, TransportError> {
        let target = format!("{}:{}", address, port);
        let peer = lookup_host((address, port))
            .await
            .map_err(|source| TransportError::Resolve {
                address: target.clone(),
                source,
            })?
            .next()
            .ok_or(TransportError::NoAddress(target))?;

        let local: SocketAddr = if peer.is_ipv4() {
            ([0u8; 4], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;

        debug!("Connected GELF socket {} -> {}", socket.local_addr()?, peer);

        Ok(Self {
            socket,
            peer,
            encoder,
            chunk_size,
            ids: MessageIds::new(),
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn encoder(&self) -> &GelfEncoder {
        &self.encoder
    }
}

impl StructuredLogger for GelfUdpClient {
    fn emit(&self, severity: Severity, metadata: Fields, message: String) -> EmitFuture<'_> {
        Box::pin(async move {
            let payload = self.encoder.encode(severity, metadata, &message, Utc::now())?;
            for datagram in chunk::split(payload, self.chunk_size, self.ids.next_id())? {
                self.socket.send(&datagram).await?;
            }
            Ok(())
        })
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        self.encoder.set_attr(name, value);
    }
}

impl Drop for GelfUdpClient {
    fn drop(&mut self) {
        debug!("Closing GELF connection to {}", self.peer);
    }
}

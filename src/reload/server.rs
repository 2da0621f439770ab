// src/reload/server.rs

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::reload::message::ReloadMessage;

/// Capacity of the broadcast channel behind the reload stream.
///
/// A lagged client skips the messages it missed; the next notification still
/// reaches it. That is acceptable for a refresh signal.
const CHANNEL_CAPACITY: usize = 64;

/// The reload notification listener.
///
/// Accepts TCP connections and pushes every broadcast `ReloadMessage` to each
/// connected client as one JSON line. Clients never send anything back; a
/// failed write just disconnects that client.
pub struct ReloadServer {
    local_addr: SocketAddr,
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadServer {
    /// Bind the listener and start the accept loop.
    ///
    /// A bind failure is fatal and propagates to the caller; there is no
    /// retry.
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding reload listener on {addr}"))?;
        let local_addr = listener
            .local_addr()
            .context("resolving reload listener address")?;

        let (sender, _) = broadcast::channel::<ReloadMessage>(CHANNEL_CAPACITY);

        info!("reload listener started on {local_addr}");

        let accept_sender = sender.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, peer)) => {
                        debug!("reload client connected from {peer}");
                        let rx = accept_sender.subscribe();
                        tokio::spawn(serve_client(stream, peer, rx));
                    }
                    Err(err) => {
                        warn!("failed to accept reload client: {err}");
                    }
                }
            }
        });

        Ok(Self { local_addr, sender })
    }

    /// Address the listener actually bound to (useful with port 0 in tests).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle for pushing notifications onto the stream.
    pub fn sender(&self) -> broadcast::Sender<ReloadMessage> {
        self.sender.clone()
    }
}

/// Forward broadcast messages to one client until it goes away.
async fn serve_client(
    mut stream: TcpStream,
    peer: SocketAddr,
    mut rx: broadcast::Receiver<ReloadMessage>,
) {
    loop {
        let msg = match rx.recv().await {
            Ok(msg) => msg,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!("reload client {peer} lagged, skipped {skipped} messages");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let mut line = match serde_json::to_vec(&msg) {
            Ok(line) => line,
            Err(err) => {
                warn!("failed to serialize reload message: {err}");
                continue;
            }
        };
        line.push(b'\n');

        if let Err(err) = stream.write_all(&line).await {
            debug!("reload client {peer} dropped: {err}");
            break;
        }
    }
}

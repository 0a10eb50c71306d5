use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};

use crate::protocol::{ClientAction, ServerMessage};

/// Channel for sending serialized frames to the connected client.
type FrameTx = mpsc::UnboundedSender<Vec<u8>>;

/// WebSocket transport for a single session.
///
/// Accepts one client, decodes its MessagePack frames into `ClientAction`s
/// and encodes outgoing `ServerMessage`s the same way.
pub struct LeagueServer {
    /// Sender half; `send_message` serializes and forwards through this
    /// channel to the write task.
    client_tx: Option<FrameTx>,

    /// Decoded client actions. Yields `None` once the client disconnects.
    pub action_rx: mpsc::UnboundedReceiver<ClientAction>,
}

impl LeagueServer {
    /// Bind the listener and wait for exactly one WebSocket client. Once
    /// connected, two background tasks are spawned:
    ///
    /// 1. **Write task**: forwards serialized frames from `client_tx` to
    ///    the WebSocket sink.
    /// 2. **Read task**: decodes binary frames as `ClientAction` and pushes
    ///    them into `action_rx`.
    pub async fn start(bind_addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(bind_addr).await?;
        info!("League server listening on ws://{}", bind_addr);
        info!("Waiting for a client connection...");

        let (stream, addr) = listener.accept().await?;
        info!("Client connected from {}", addr);

        let ws_stream = accept_async(stream).await.map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::ConnectionAborted,
                format!("WebSocket handshake failed: {}", e),
            )
        })?;

        let (mut ws_write, mut ws_read) = ws_stream.split();

        // Channel: event loop -> write task -> WebSocket
        let (client_tx, mut client_rx) = mpsc::unbounded_channel::<Vec<u8>>();

        // ── Write task ──────────────────────────────────────────────
        tokio::spawn(async move {
            while let Some(bytes) = client_rx.recv().await {
                if let Err(e) = ws_write.send(Message::Binary(bytes.into())).await {
                    error!("Failed to send WebSocket message: {}", e);
                    break;
                }
            }
            info!("Write task shutting down");
        });

        // ── Read task ───────────────────────────────────────────────
        let (action_tx, action_rx) = mpsc::unbounded_channel::<ClientAction>();
        tokio::spawn(async move {
            while let Some(result) = ws_read.next().await {
                match result {
                    Ok(msg) if msg.is_binary() => {
                        let data = msg.into_data();
                        match rmp_serde::from_slice::<ClientAction>(&data) {
                            Ok(action) => {
                                if action_tx.send(action).is_err() {
                                    warn!("Action channel closed");
                                    break;
                                }
                            }
                            Err(e) => warn!("Failed to decode ClientAction: {}", e),
                        }
                    }
                    Ok(msg) if msg.is_close() => break,
                    Ok(_) => {}
                    Err(e) => {
                        error!("WebSocket read error: {}", e);
                        break;
                    }
                }
            }
            info!("Read task shutting down");
        });

        Ok(Self {
            client_tx: Some(client_tx),
            action_rx,
        })
    }

    /// Send a ServerMessage to the client. No-op once the client is gone.
    pub fn send_message(&mut self, msg: &ServerMessage) {
        if let Some(tx) = &self.client_tx {
            match encode_message(msg) {
                Ok(bytes) => {
                    if tx.send(bytes).is_err() {
                        warn!("Client disconnected, stopping sends");
                        self.client_tx = None;
                    }
                }
                Err(e) => error!("Failed to serialize ServerMessage: {}", e),
            }
        }
    }
}

pub fn encode_message(msg: &ServerMessage) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    rmp_serde::to_vec_named(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::AssistantPanel;
    use crate::progression::profiles::Platform;

    #[test]
    fn client_actions_decode_from_msgpack() {
        let action = ClientAction::LinkProfile {
            platform: Platform::Orcid,
            external_id: "0000-0001".to_string(),
            observed_h_index: Some(21),
        };
        let bytes = rmp_serde::to_vec_named(&action).unwrap();
        match rmp_serde::from_slice::<ClientAction>(&bytes).unwrap() {
            ClientAction::LinkProfile {
                platform,
                external_id,
                observed_h_index,
            } => {
                assert_eq!(platform, Platform::Orcid);
                assert_eq!(external_id, "0000-0001");
                assert_eq!(observed_h_index, Some(21));
            }
            other => panic!("decoded wrong variant: {:?}", other),
        }
    }

    #[test]
    fn send_after_disconnect_stops_sending() {
        let (client_tx, client_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (_action_tx, action_rx) = mpsc::unbounded_channel::<ClientAction>();
        let mut server = LeagueServer {
            client_tx: Some(client_tx),
            action_rx,
        };
        drop(client_rx);

        server.send_message(&ServerMessage::AssistantPending {
            panel: AssistantPanel::Idea,
        });
        assert!(server.client_tx.is_none());
    }
}

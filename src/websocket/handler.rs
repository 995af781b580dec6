//! WebSocket Handler
//!
//! Upgrades `/ws` requests and runs one loop per socket that forwards hub
//! events out and answers client frames in place.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::ConnectionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;

/// GET /ws
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.ws_hub);
    ws.on_upgrade(move |socket| run_socket(socket, hub))
}

/// What to do after an inbound frame
#[derive(Debug)]
enum Step {
    Reply(ServerMessage),
    Continue,
    Close,
}

async fn push(sink: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> bool {
    match serde_json::to_string(message) {
        Ok(text) => sink.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            true
        }
    }
}

async fn run_socket(socket: WebSocket, hub: Arc<ConnectionHub>) {
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut inbox) = mpsc::unbounded_channel();

    let id = match hub.register(outbox).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected WebSocket connection");
            let _ = push(&mut sink, &ServerMessage::Error { message: e.to_string() }).await;
            let _ = sink.close().await;
            return;
        }
    };

    let hello = ServerMessage::Connected {
        connection_id: id.clone(),
    };
    let mut open = push(&mut sink, &hello).await;

    while open {
        tokio::select! {
            event = inbox.recv() => {
                open = match event {
                    Some(message) => push(&mut sink, &message).await,
                    None => false,
                };
            }
            frame = stream.next() => {
                let step = match frame {
                    Some(Ok(frame)) => on_frame(&hub, &id, frame).await,
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %id, error = %e, "WebSocket receive error");
                        Step::Close
                    }
                    None => Step::Close,
                };
                open = match step {
                    Step::Reply(message) => push(&mut sink, &message).await,
                    Step::Continue => true,
                    Step::Close => false,
                };
            }
        }
    }

    hub.unregister(&id).await;
}

async fn on_frame(hub: &ConnectionHub, id: &str, frame: Message) -> Step {
    match frame {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(message) => Step::Reply(apply(hub, id, message).await),
            Err(e) => {
                tracing::debug!(connection_id = %id, error = %e, "Invalid client message");
                Step::Reply(ServerMessage::Error {
                    message: format!("Invalid message format: {}", e),
                })
            }
        },
        Message::Binary(_) => Step::Reply(ServerMessage::Error {
            message: "Binary messages not supported".to_string(),
        }),
        Message::Ping(_) | Message::Pong(_) => Step::Continue,
        Message::Close(_) => Step::Close,
    }
}

async fn apply(hub: &ConnectionHub, id: &str, message: ClientMessage) -> ServerMessage {
    let outcome = match message {
        ClientMessage::Subscribe { topics } => hub
            .subscribe(id, &topics)
            .await
            .map(|topics| ServerMessage::Subscribed { topics }),
        ClientMessage::Unsubscribe { topics } => hub
            .unsubscribe(id, &topics)
            .await
            .map(|topics| ServerMessage::Unsubscribed { topics }),
        ClientMessage::Ping => Ok(ServerMessage::Pong),
    };

    outcome.unwrap_or_else(|e| ServerMessage::Error {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::{HubConfig, Topic};

    async fn hub_with_connection() -> (ConnectionHub, String) {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();
        (hub, id)
    }

    #[tokio::test]
    async fn test_subscribe_reply_lists_accepted_topics() {
        let (hub, id) = hub_with_connection().await;

        let reply = apply(
            &hub,
            &id,
            ClientMessage::Subscribe {
                topics: vec!["votes".to_string(), "weather".to_string()],
            },
        )
        .await;
        match reply {
            ServerMessage::Subscribed { topics } => assert_eq!(topics, vec![Topic::Votes]),
            other => panic!("Expected Subscribed, got {:?}", other),
        }
        assert_eq!(hub.subscriber_count(Topic::Votes).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_connection_gets_error() {
        let hub = ConnectionHub::new(HubConfig::default());
        let reply = apply(
            &hub,
            "gone",
            ClientMessage::Unsubscribe {
                topics: vec!["votes".to_string()],
            },
        )
        .await;
        assert!(matches!(reply, ServerMessage::Error { .. }));
    }

    #[tokio::test]
    async fn test_frames() {
        let (hub, id) = hub_with_connection().await;

        let step = on_frame(&hub, &id, Message::Text(r#"{"type":"ping"}"#.to_string())).await;
        assert!(matches!(step, Step::Reply(ServerMessage::Pong)));

        let step = on_frame(&hub, &id, Message::Text("garbage".to_string())).await;
        assert!(matches!(step, Step::Reply(ServerMessage::Error { .. })));

        let step = on_frame(&hub, &id, Message::Binary(vec![1, 2])).await;
        assert!(matches!(step, Step::Reply(ServerMessage::Error { .. })));

        assert!(matches!(
            on_frame(&hub, &id, Message::Ping(vec![])).await,
            Step::Continue
        ));
        assert!(matches!(
            on_frame(&hub, &id, Message::Close(None)).await,
            Step::Close
        ));
    }
}

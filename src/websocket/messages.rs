//! WebSocket Message Types
//!
//! Frames exchanged between live dashboards and the BlockVote server, plus
//! the topic each chain event is published under.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chain::{Address, Election, TxHash};

/// Event channel a connection can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Election created / ended
    Election,
    /// Votes cast
    Votes,
    /// Wallet connected / disconnected
    Wallet,
    /// Server notices
    System,
    /// Every event
    #[serde(rename = "*")]
    All,
}

impl Topic {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "election" => Some(Topic::Election),
            "votes" => Some(Topic::Votes),
            "wallet" => Some(Topic::Wallet),
            "system" => Some(Topic::System),
            "*" => Some(Topic::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Election => "election",
            Topic::Votes => "votes",
            Topic::Wallet => "wallet",
            Topic::System => "system",
            Topic::All => "*",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages sent from client to server
///
/// Topic names stay raw strings so one unknown name does not reject the
/// whole frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Subscribe { topics: Vec<String> },
    Unsubscribe { topics: Vec<String> },
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First frame on every connection
    Connected { connection_id: String },
    Subscribed { topics: Vec<Topic> },
    Unsubscribed { topics: Vec<Topic> },
    Pong,
    Error { message: String },

    ElectionCreated { election: Election },
    /// The election was closed and reset to the inactive record
    ElectionEnded,
    VoteCast { candidate_id: i64, tx_hash: TxHash },
    WalletConnected { address: Address },
    WalletDisconnected,
    Notice { message: String },
}

/// A chain event on its way through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    pub topic: Topic,
    pub message: ServerMessage,
}

impl WsEvent {
    pub fn election_created(election: &Election) -> Self {
        Self {
            topic: Topic::Election,
            message: ServerMessage::ElectionCreated {
                election: election.clone(),
            },
        }
    }

    pub fn election_ended() -> Self {
        Self {
            topic: Topic::Election,
            message: ServerMessage::ElectionEnded,
        }
    }

    pub fn vote_cast(candidate_id: i64, tx_hash: &TxHash) -> Self {
        Self {
            topic: Topic::Votes,
            message: ServerMessage::VoteCast {
                candidate_id,
                tx_hash: tx_hash.clone(),
            },
        }
    }

    pub fn wallet_connected(address: &Address) -> Self {
        Self {
            topic: Topic::Wallet,
            message: ServerMessage::WalletConnected {
                address: address.clone(),
            },
        }
    }

    pub fn wallet_disconnected() -> Self {
        Self {
            topic: Topic::Wallet,
            message: ServerMessage::WalletDisconnected,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            topic: Topic::System,
            message: ServerMessage::Notice {
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_names() {
        for topic in [
            Topic::Election,
            Topic::Votes,
            Topic::Wallet,
            Topic::System,
            Topic::All,
        ] {
            assert_eq!(Topic::parse(topic.as_str()), Some(topic));
        }
        assert_eq!(Topic::parse("votes.*"), None);
        assert_eq!(Topic::parse("Votes"), None);
        assert_eq!(serde_json::to_string(&Topic::All).unwrap(), r#""*""#);
    }

    #[test]
    fn test_client_message_deserialize() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type": "subscribe", "topics": ["election", "nope"]}"#)
                .unwrap();
        match msg {
            ClientMessage::Subscribe { topics } => assert_eq!(topics, vec!["election", "nope"]),
            other => panic!("Expected Subscribe, got {:?}", other),
        }

        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "shout"}"#).is_err());
    }

    #[test]
    fn test_server_message_wire_format() {
        let msg = ServerMessage::ElectionCreated {
            election: Election::open("Board", "2024-05-01", "2024-05-02"),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "election_created");
        assert_eq!(json["election"]["startDate"], "2024-05-01");

        assert_eq!(
            serde_json::to_string(&ServerMessage::ElectionEnded).unwrap(),
            r#"{"type":"election_ended"}"#
        );

        let json = serde_json::to_value(ServerMessage::Subscribed {
            topics: vec![Topic::Votes, Topic::All],
        })
        .unwrap();
        assert_eq!(json["topics"], serde_json::json!(["votes", "*"]));
    }

    #[test]
    fn test_event_topics() {
        let tx = TxHash::random();
        let event = WsEvent::vote_cast(3, &tx);
        assert_eq!(event.topic, Topic::Votes);
        assert!(matches!(
            event.message,
            ServerMessage::VoteCast { candidate_id: 3, .. }
        ));

        assert_eq!(WsEvent::election_ended().topic, Topic::Election);
        assert_eq!(WsEvent::wallet_disconnected().topic, Topic::Wallet);
        assert_eq!(WsEvent::system("bye").topic, Topic::System);
    }
}

//! WebSocket Connection Hub
//!
//! Connection registry and topic index behind one lock. Events go to every
//! connection subscribed to their topic or to `*`, at most once each.

use std::collections::{HashMap, HashSet};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::{ServerMessage, Topic, WsEvent};

pub type ConnectionId = String;

/// Outbound half of a live connection
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

#[derive(Debug, Clone)]
pub struct HubConfig {
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
        }
    }
}

struct Connection {
    outbox: Outbox,
    topics: HashSet<Topic>,
    opened_at: Instant,
}

#[derive(Default)]
struct Registry {
    connections: HashMap<ConnectionId, Connection>,
    /// Topic → subscribed connections; empty sets are dropped
    subscribers: HashMap<Topic, HashSet<ConnectionId>>,
}

impl Registry {
    fn detach(&mut self, id: &str, topic: Topic) {
        if let Some(ids) = self.subscribers.get_mut(&topic) {
            ids.remove(id);
            if ids.is_empty() {
                self.subscribers.remove(&topic);
            }
        }
    }

    fn drop_connection(&mut self, id: &str) -> Option<Connection> {
        let connection = self.connections.remove(id)?;
        for topic in &connection.topics {
            self.detach(id, *topic);
        }
        Some(connection)
    }
}

/// Live connections and their subscriptions
pub struct ConnectionHub {
    registry: RwLock<Registry>,
    config: HubConfig,
}

impl ConnectionHub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            config,
        }
    }

    /// Add a connection; fails once `max_connections` are open
    pub async fn register(&self, outbox: Outbox) -> Result<ConnectionId, HubError> {
        let mut registry = self.registry.write().await;
        if registry.connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        registry.connections.insert(
            id.clone(),
            Connection {
                outbox,
                topics: HashSet::new(),
                opened_at: Instant::now(),
            },
        );

        tracing::info!(
            connection_id = %id,
            open = registry.connections.len(),
            "WebSocket connected"
        );
        Ok(id)
    }

    pub async fn unregister(&self, id: &str) {
        if let Some(connection) = self.registry.write().await.drop_connection(id) {
            tracing::info!(
                connection_id = %id,
                duration_secs = connection.opened_at.elapsed().as_secs(),
                "WebSocket disconnected"
            );
        }
    }

    /// Subscribe to the named topics, returning the ones accepted
    ///
    /// Unknown names are skipped with a warning.
    pub async fn subscribe(&self, id: &str, names: &[String]) -> Result<Vec<Topic>, HubError> {
        let mut guard = self.registry.write().await;
        let registry = &mut *guard;
        let connection = registry
            .connections
            .get_mut(id)
            .ok_or(HubError::ConnectionNotFound)?;

        let mut accepted = Vec::new();
        for name in names {
            let Some(topic) = Topic::parse(name) else {
                tracing::warn!(connection_id = %id, topic = %name, "Unknown topic ignored");
                continue;
            };
            connection.topics.insert(topic);
            registry
                .subscribers
                .entry(topic)
                .or_default()
                .insert(id.to_string());
            if !accepted.contains(&topic) {
                accepted.push(topic);
            }
        }

        tracing::debug!(connection_id = %id, topics = ?accepted, "Subscribed");
        Ok(accepted)
    }

    /// Unsubscribe from the named topics, returning the ones that were held
    pub async fn unsubscribe(&self, id: &str, names: &[String]) -> Result<Vec<Topic>, HubError> {
        let mut registry = self.registry.write().await;
        let connection = registry
            .connections
            .get_mut(id)
            .ok_or(HubError::ConnectionNotFound)?;

        let dropped: Vec<Topic> = names
            .iter()
            .filter_map(|name| Topic::parse(name))
            .filter(|topic| connection.topics.remove(topic))
            .collect();

        for topic in &dropped {
            registry.detach(id, *topic);
        }

        tracing::debug!(connection_id = %id, topics = ?dropped, "Unsubscribed");
        Ok(dropped)
    }

    /// Fan an event out to its subscribers
    ///
    /// Returns how many connections accepted it. Connections whose socket
    /// task has gone away are removed.
    pub async fn publish(&self, event: WsEvent) -> usize {
        let mut registry = self.registry.write().await;

        let recipients: HashSet<ConnectionId> = [event.topic, Topic::All]
            .iter()
            .filter_map(|topic| registry.subscribers.get(topic))
            .flatten()
            .cloned()
            .collect();

        let mut delivered = 0;
        let mut stale = Vec::new();
        for id in recipients {
            match registry.connections.get(&id) {
                Some(connection) if connection.outbox.send(event.message.clone()).is_ok() => {
                    delivered += 1;
                }
                _ => stale.push(id),
            }
        }

        for id in &stale {
            registry.drop_connection(id);
        }
        if !stale.is_empty() {
            tracing::debug!(topic = %event.topic, stale = stale.len(), "Dropped closed connections");
        }

        tracing::trace!(topic = %event.topic, delivered, "Published event");
        delivered
    }

    pub async fn connection_count(&self) -> usize {
        self.registry.read().await.connections.len()
    }

    pub async fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry
            .read()
            .await
            .subscribers
            .get(&topic)
            .map_or(0, HashSet::len)
    }
}

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,
}

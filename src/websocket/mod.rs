//! WebSocket Live Events
//!
//! Pushes chain events to dashboards so results and admin views can refresh
//! without polling.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: connection registry and topic index, pruned on publish
//! - **Handler**: one `select!` loop per socket
//! - **Messages**: wire frames and the [`Topic`] enum
//!
//! ## Topics
//!
//! - `election` - Election created / ended
//! - `votes` - Votes cast
//! - `wallet` - Wallet connected / disconnected
//! - `system` - Server notices
//! - `*` - Everything
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8080/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'subscribe', topics: ['votes', 'election']}));
//! };
//!
//! ws.onmessage = (event) => console.log(JSON.parse(event.data));
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage, Topic, WsEvent};

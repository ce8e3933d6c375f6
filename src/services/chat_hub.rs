use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::order::Message;

/// Event published on an order's message topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    MessageCreated { order_id: Uuid, message: Message },
}

/// Live fan-out of chat messages, one topic per order.
///
/// Delivery is at-most-once and best-effort: a subscriber connected after
/// an event was published simply misses it and catches up on the next full
/// transcript fetch, since the message write is durable regardless of
/// broadcast outcome.
#[derive(Clone)]
pub struct ChatHub {
    topics: Arc<RwLock<HashMap<Uuid, HashMap<Uuid, mpsc::UnboundedSender<ChatEvent>>>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe to one order's topic. Returns the subscriber id (for
    /// `unsubscribe`) and the event stream.
    pub async fn subscribe(&self, order_id: Uuid) -> (Uuid, mpsc::UnboundedReceiver<ChatEvent>) {
        let client_id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        self.topics
            .write()
            .await
            .entry(order_id)
            .or_default()
            .insert(client_id, tx);
        (client_id, rx)
    }

    pub async fn unsubscribe(&self, order_id: Uuid, client_id: Uuid) {
        let mut topics = self.topics.write().await;
        if let Some(subscribers) = topics.get_mut(&order_id) {
            subscribers.remove(&client_id);
            if subscribers.is_empty() {
                topics.remove(&order_id);
            }
        }
    }

    /// Publish an event to every current subscriber of the order's topic.
    /// Returns how many subscribers the event was handed to; zero means
    /// the event was dropped, which is fine.
    pub async fn publish(&self, order_id: Uuid, event: ChatEvent) -> usize {
        let topics = self.topics.read().await;
        let Some(subscribers) = topics.get(&order_id) else {
            return 0;
        };

        let mut delivered = 0;
        for (client_id, tx) in subscribers.iter() {
            match tx.send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(
                        order_id = %order_id,
                        client_id = %client_id,
                        "Failed to enqueue chat event for subscriber: {}", e
                    );
                }
            }
        }
        delivered
    }

    pub async fn subscriber_count(&self, order_id: Uuid) -> usize {
        self.topics
            .read()
            .await
            .get(&order_id)
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }

    /// Attach a WebSocket client to one order's topic and pump events to it
    /// until either side disconnects.
    pub async fn register_client(&self, socket: WebSocket, order_id: Uuid) -> Uuid {
        let (mut sender, mut receiver) = socket.split();
        let (client_id, mut rx) = self.subscribe(order_id).await;

        info!(order_id = %order_id, client_id = %client_id, "Chat subscriber connected");

        // Forward published events to this client.
        let hub = self.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if let Err(e) = sender.send(WsMessage::Text(json.into())).await {
                            warn!(client_id = %client_id, "Failed to send chat event: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(client_id = %client_id, "Failed to serialize chat event: {}", e);
                    }
                }
            }
            hub.unsubscribe(order_id, client_id).await;
            info!(order_id = %order_id, client_id = %client_id, "Chat subscriber disconnected");
        });

        // Drain incoming frames; clients only listen on this channel, so
        // everything except Close is ignored.
        let hub = self.clone();
        tokio::spawn(async move {
            while let Some(Ok(frame)) = receiver.next().await {
                if let WsMessage::Close(_) = frame {
                    break;
                }
            }
            hub.unsubscribe(order_id, client_id).await;
        });

        client_id
    }
}

impl Default for ChatHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::types::SenderRole;
    use chrono::Utc;

    fn sample_message(order_id: Uuid) -> Message {
        Message {
            id: Uuid::new_v4(),
            chat_id: order_id,
            sender_role: SenderRole::Buyer,
            body: "hello".to_string(),
            attachments: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn events_reach_only_the_orders_subscribers() {
        let hub = ChatHub::new();
        let order_a = Uuid::new_v4();
        let order_b = Uuid::new_v4();

        let (_id_a, mut rx_a) = hub.subscribe(order_a).await;
        let (_id_b, mut rx_b) = hub.subscribe(order_b).await;

        let message = sample_message(order_a);
        let delivered = hub
            .publish(
                order_a,
                ChatEvent::MessageCreated {
                    order_id: order_a,
                    message,
                },
            )
            .await;

        assert_eq!(delivered, 1);
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_silent_drop() {
        let hub = ChatHub::new();
        let order_id = Uuid::new_v4();
        let delivered = hub
            .publish(
                order_id,
                ChatEvent::MessageCreated {
                    order_id,
                    message: sample_message(order_id),
                },
            )
            .await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let hub = ChatHub::new();
        let order_id = Uuid::new_v4();

        let (client_id, mut rx) = hub.subscribe(order_id).await;
        hub.unsubscribe(order_id, client_id).await;

        let delivered = hub
            .publish(
                order_id,
                ChatEvent::MessageCreated {
                    order_id,
                    message: sample_message(order_id),
                },
            )
            .await;

        assert_eq!(delivered, 0);
        assert!(rx.try_recv().is_err());
        assert_eq!(hub.subscriber_count(order_id).await, 0);
    }
}

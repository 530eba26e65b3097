use actix_web::web::Bytes;
use dashmap::DashMap;
use futures_util::Stream;
use std::{
    convert::Infallible,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::modules::sse::event::{SseEvent, EVENT_CONNECT};

/// One user's live push channel. Dropping the sender ends the HTTP stream on
/// the other side, so removal from the table doubles as termination.
struct LiveConnection {
    id: Uuid,
    tx: UnboundedSender<SseEvent>,
}

/// Process-wide table of open SSE connections, at most one per user.
///
/// The table is the only shared mutable state in the push path and is mutated
/// concurrently from request handlers, eviction tasks, and stream drops, so it
/// is a concurrent map rather than a mutex around a plain map. Delivery is
/// best-effort: the durable notification row is the source of truth, a push
/// that finds no (working) connection is simply dropped.
pub struct SseRegistry {
    connections: DashMap<Uuid, LiveConnection>,
    timeout: Duration,
}

impl SseRegistry {
    pub fn new(timeout: Duration) -> Self {
        SseRegistry { connections: DashMap::new(), timeout }
    }

    /// Opens a connection for `user_id`, superseding any existing one, and
    /// returns the event stream for the HTTP layer to hold open. The stream
    /// starts with a `connect` ack so proxies flush their buffers promptly.
    pub fn connect(self: &Arc<Self>, user_id: Uuid) -> ConnectionStream {
        if self.connections.remove(&user_id).is_some() {
            log::info!("[SSE] superseding existing connection - user: {user_id}");
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        let ack = SseEvent::raw(EVENT_CONNECT, format!("SSE connected - userId: {user_id}"));
        let _ = tx.send(ack);

        self.connections.insert(user_id, LiveConnection { id: connection_id, tx });
        log::info!("[SSE] connected - user: {user_id}, open connections: {}", self.len());

        let registry = Arc::clone(self);
        let deadline = self.timeout;
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            if registry.evict(user_id, connection_id) {
                log::info!("[SSE] timeout - user: {user_id}");
            }
        });

        ConnectionStream { registry: Arc::clone(self), user_id, connection_id, rx }
    }

    /// Best-effort write to `user_id`'s connection. Absent user means offline
    /// and is not an error; a failed write evicts the dead entry. Never blocks:
    /// the channel is unbounded and the actual transport write happens on the
    /// connection's own stream.
    pub fn push(&self, user_id: Uuid, event: SseEvent) {
        let Some(conn) = self.connections.get(&user_id) else {
            log::debug!("[SSE] push skipped, user offline - user: {user_id}");
            return;
        };
        let connection_id = conn.id;
        let failed = conn.tx.send(event).is_err();
        drop(conn);

        if failed {
            self.evict(user_id, connection_id);
            log::warn!("[SSE] push failed, connection removed - user: {user_id}");
        } else {
            log::debug!("[SSE] event pushed - user: {user_id}");
        }
    }

    /// Removes the entry only if it still belongs to `connection_id`, so a
    /// stale cleanup never tears down a superseding connection. Idempotent.
    fn evict(&self, user_id: Uuid, connection_id: Uuid) -> bool {
        self.connections.remove_if(&user_id, |_, conn| conn.id == connection_id).is_some()
    }

    pub fn is_connected(&self, user_id: Uuid) -> bool {
        self.connections.contains_key(&user_id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// The receiving half of a live connection, streamed as the SSE response body.
/// Ends when the sender is dropped (superseded or evicted); dropping it on
/// client disconnect removes the registry entry.
pub struct ConnectionStream {
    registry: Arc<SseRegistry>,
    user_id: Uuid,
    connection_id: Uuid,
    rx: UnboundedReceiver<SseEvent>,
}

impl Stream for ConnectionStream {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(event)) => Poll::Ready(Some(Ok(event.to_frame()))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for ConnectionStream {
    fn drop(&mut self) {
        if self.registry.evict(self.user_id, self.connection_id) {
            log::info!("[SSE] disconnected - user: {}", self.user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::sse::event::EVENT_NOTIFICATION;
    use futures_util::StreamExt;

    fn registry() -> Arc<SseRegistry> {
        Arc::new(SseRegistry::new(Duration::from_secs(60)))
    }

    fn user() -> Uuid {
        Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
    }

    async fn next_frame(stream: &mut ConnectionStream) -> Option<String> {
        stream
            .next()
            .await
            .map(|r| String::from_utf8(r.expect("infallible").to_vec()).expect("utf8"))
    }

    #[tokio::test]
    async fn connect_emits_ack_first() {
        let registry = registry();
        let user_id = user();

        let mut stream = registry.connect(user_id);
        let frame = next_frame(&mut stream).await.expect("ack frame");
        assert!(frame.starts_with("event: connect\n"));
    }

    #[tokio::test]
    async fn reconnect_supersedes_previous_connection() {
        let registry = registry();
        let user_id = user();

        let mut first = registry.connect(user_id);
        let mut second = registry.connect(user_id);
        assert_eq!(registry.len(), 1);

        // The first stream drains its ack and then ends: its sender is gone.
        assert!(next_frame(&mut first).await.is_some());
        assert!(next_frame(&mut first).await.is_none());

        // The survivor still receives events.
        registry.push(user_id, SseEvent::raw(EVENT_NOTIFICATION, "x"));
        assert!(next_frame(&mut second).await.is_some()); // ack
        let frame = next_frame(&mut second).await.expect("pushed frame");
        assert!(frame.starts_with("event: notification\n"));
    }

    #[tokio::test]
    async fn dropping_superseded_stream_keeps_new_entry() {
        let registry = registry();
        let user_id = user();

        let first = registry.connect(user_id);
        let _second = registry.connect(user_id);
        drop(first);

        assert!(registry.is_connected(user_id));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn push_to_offline_user_is_noop() {
        let registry = registry();
        registry.push(user(), SseEvent::raw(EVENT_NOTIFICATION, "x"));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn pushes_to_same_user_arrive_in_order() {
        let registry = registry();
        let user_id = user();

        let mut stream = registry.connect(user_id);
        registry.push(user_id, SseEvent::raw(EVENT_NOTIFICATION, "first"));
        registry.push(user_id, SseEvent::raw(EVENT_NOTIFICATION, "second"));

        assert!(next_frame(&mut stream).await.is_some()); // ack
        let a = next_frame(&mut stream).await.expect("first");
        let b = next_frame(&mut stream).await.expect("second");
        assert!(a.contains("first"));
        assert!(b.contains("second"));
    }

    #[tokio::test]
    async fn client_disconnect_removes_entry() {
        let registry = registry();
        let user_id = user();

        let stream = registry.connect(user_id);
        assert!(registry.is_connected(user_id));

        drop(stream);
        assert!(!registry.is_connected(user_id));

        // A later push is a clean no-op.
        registry.push(user_id, SseEvent::raw(EVENT_NOTIFICATION, "x"));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn deadline_expiry_evicts_entry() {
        let registry = Arc::new(SseRegistry::new(Duration::from_millis(20)));
        let user_id = user();

        let _stream = registry.connect(user_id);
        assert!(registry.is_connected(user_id));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!registry.is_connected(user_id));
    }
}

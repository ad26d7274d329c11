//! In-process event bus.
//!
//! This is the one message-bus shape the core itself references (`#[consumer]`
//! controller methods); concrete transports (Kafka, RabbitMQ, Pulsar, Iggy)
//! are external collaborators and live in their own crates, not here.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Marker trait for types that can be published on an [`EventBus`].
///
/// A type may declare a `parent_type_id` to participate in a (single-level)
/// event hierarchy: a listener subscribed to the parent type is invoked for
/// publishes of the subtype too, in addition to its own listeners.
pub trait Event: Any + Send + Sync + 'static {
    /// `TypeId` of this event's declared supertype, if any.
    fn parent_type_id() -> Option<TypeId>
    where
        Self: Sized,
    {
        None
    }
}

type BoxedHandler =
    Box<dyn Fn(Arc<dyn Any + Send + Sync>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// A shared, in-process publish/subscribe bus.
///
/// Cloning an `EventBus` is cheap — all clones share the same subscriber
/// table via an internal `Arc`. Listeners for a given event type run
/// sequentially, in registration order, on every `publish` call.
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<Mutex<HashMap<TypeId, Vec<BoxedHandler>>>>,
}

impl EventBus {
    /// Create a new, empty bus.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe `handler` to events of type `E`, appending to that type's
    /// listener list (registration order is preserved).
    pub async fn subscribe<E, F, Fut>(&self, handler: F)
    where
        E: Event,
        F: Fn(Arc<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let boxed: BoxedHandler = Box::new(move |event: Arc<dyn Any + Send + Sync>| {
            let event = event
                .downcast::<E>()
                .unwrap_or_else(|_| panic!("r2e-events: handler registered for wrong event type"));
            Box::pin(handler(event))
        });
        self.handlers
            .lock()
            .await
            .entry(TypeId::of::<E>())
            .or_default()
            .push(boxed);
    }

    /// Publish an event. Listeners for `E`'s exact type run first (in
    /// registration order), followed by any listener registered for `E`'s
    /// declared parent type.
    pub async fn publish<E: Event>(&self, event: E) {
        let event: Arc<dyn Any + Send + Sync> = Arc::new(event);
        let mut type_ids = vec![TypeId::of::<E>()];
        if let Some(parent) = E::parent_type_id() {
            type_ids.push(parent);
        }

        for type_id in type_ids {
            self.invoke_type(type_id, &event).await;
        }
    }

    async fn invoke_type(&self, type_id: TypeId, event: &Arc<dyn Any + Send + Sync>) {
        // Snapshot the handler count under the lock, then call each handler
        // by index without holding the lock across the `.await` (handlers
        // are never removed, so indices stay valid).
        let len = {
            let guard = self.handlers.lock().await;
            guard.get(&type_id).map(|v| v.len()).unwrap_or(0)
        };
        for i in 0..len {
            let fut = {
                let guard = self.handlers.lock().await;
                let handler = &guard.get(&type_id).expect("handler list vanished")[i];
                handler(event.clone())
            };
            fut.await;
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Ping;
    impl Event for Ping {}

    #[tokio::test]
    async fn listeners_run_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let o1 = order.clone();
        bus.subscribe::<Ping, _, _>(move |_| {
            let o1 = o1.clone();
            async move { o1.lock().await.push(1) }
        })
        .await;

        let o2 = order.clone();
        bus.subscribe::<Ping, _, _>(move |_| {
            let o2 = o2.clone();
            async move { o2.lock().await.push(2) }
        })
        .await;

        bus.publish(Ping).await;

        assert_eq!(*order.lock().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn counts_each_publish() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        bus.subscribe::<Ping, _, _>(move |_| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        bus.publish(Ping).await;
        bus.publish(Ping).await;
        bus.publish(Ping).await;

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    struct OrderCreated;
    impl Event for OrderCreated {
        fn parent_type_id() -> Option<TypeId> {
            Some(TypeId::of::<OrderEventMarker>())
        }
    }

    struct OrderEventMarker;
    impl Event for OrderEventMarker {}

    #[tokio::test]
    async fn parent_listener_runs_for_subtype() {
        let bus = EventBus::new();
        let parent_hits = Arc::new(AtomicUsize::new(0));
        let p = parent_hits.clone();
        bus.subscribe::<OrderEventMarker, _, _>(move |_| {
            let p = p.clone();
            async move {
                p.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        bus.publish(OrderCreated).await;

        assert_eq!(parent_hits.load(Ordering::SeqCst), 1);
    }
}

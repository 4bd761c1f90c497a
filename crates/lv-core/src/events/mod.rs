use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// Dashboard-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Dashboard events
pub mod events {
    use super::Event;

    /// Dataset finished loading
    #[derive(Debug, Clone)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub record_count: usize,
        pub skipped_rows: usize,
    }

    /// Country group changed
    #[derive(Debug, Clone)]
    pub struct GroupChanged {
        pub group: String,
        pub base_count: usize,
    }

    /// Gender filter changed
    #[derive(Debug, Clone)]
    pub struct GenderFilterChanged {
        pub genders: Vec<String>,
        pub filtered_count: usize,
    }

    /// Shared leader selection changed
    #[derive(Debug, Clone)]
    pub struct SelectionChanged {
        pub selected: Vec<String>,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        DatasetLoaded,
        GroupChanged,
        GenderFilterChanged,
        SelectionChanged
    );
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let mut handlers = self.handlers.lock();
        handlers.entry(TypeId::of::<E>()).or_default().push(handler);
    }

    /// Subscribe a closure that receives the concrete event type
    pub fn subscribe_fn<E, F>(&self, f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(Box::new(TypedHandler {
            handler: f,
            _event: std::marker::PhantomData::<fn(&E)>,
        }));
    }

    /// Publish an event to every handler subscribed to its type
    pub fn publish<E: Event>(&self, event: E) {
        let mut handlers = self.handlers.lock();
        if let Some(event_handlers) = handlers.get_mut(&TypeId::of::<E>()) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

struct TypedHandler<E, F> {
    handler: F,
    _event: std::marker::PhantomData<fn(&E)>,
}

impl<E, F> EventHandler for TypedHandler<E, F>
where
    E: Event,
    F: FnMut(&E) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        if let Some(event) = event.as_any().downcast_ref::<E>() {
            (self.handler)(event);
        }
    }
}

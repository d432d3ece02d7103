//! Event and messaging system.
//!
//! This is a small typed event bus. The character pushes gameplay events
//! (attack pulses, chain completion) while it resolves a frame; the frame
//! output drains them, so every event is observed exactly once.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// Typed event bus.
#[derive(Default)]
pub struct EventBus {
    queues: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EventBus {
    fn queue_mut<E: 'static + Send + Sync>(&mut self) -> Option<&mut Vec<E>> {
        self.queues
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()))
            .downcast_mut::<Vec<E>>()
    }

    fn queue<E: 'static + Send + Sync>(&self) -> Option<&Vec<E>> {
        self.queues
            .get(&TypeId::of::<E>())
            .and_then(|boxed| boxed.downcast_ref::<Vec<E>>())
    }

    /// Pushes an event into the queue.
    pub fn push<E: 'static + Send + Sync>(&mut self, e: E) {
        // Queues are keyed by `TypeId::of::<E>()`, so the downcast cannot miss.
        if let Some(q) = self.queue_mut::<E>() {
            q.push(e);
        }
    }

    /// Drains all queued events of a type.
    pub fn drain<E: 'static + Send + Sync>(&mut self) -> Vec<E> {
        self.queues
            .remove(&TypeId::of::<E>())
            .and_then(|boxed| boxed.downcast::<Vec<E>>().ok())
            .map(|boxed| *boxed)
            .unwrap_or_default()
    }

    /// Number of queued events of a type.
    pub fn len<E: 'static + Send + Sync>(&self) -> usize {
        self.queue::<E>().map_or(0, Vec::len)
    }

    /// Returns true if no events of any type are queued.
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

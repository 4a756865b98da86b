//! Change notification dispatch
//!
//! Observers register a callback and receive every event raised afterwards,
//! in registration order. Observers never see each other; the only way to
//! react to a change is to read the event payload.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Dispatcher::register`]
    pub struct ObserverId;
}

/// Which palette slots a change touched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangedSlots {
    /// Every slot was recomputed
    All,
    /// Exactly one slot was overwritten
    Slot(usize),
}

impl ChangedSlots {
    /// Whether slot `index` is covered by this change
    pub fn contains(self, index: usize) -> bool {
        match self {
            ChangedSlots::All => true,
            ChangedSlots::Slot(slot) => slot == index,
        }
    }
}

type Observer<E> = Box<dyn FnMut(&E)>;

/// Ordered set of observers for one event type
pub struct Dispatcher<E> {
    observers: SlotMap<ObserverId, Observer<E>>,
    order: Vec<ObserverId>,
}

impl<E> Dispatcher<E> {
    pub fn new() -> Self {
        Self {
            observers: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register an observer
    pub fn register<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&E) + 'static,
    {
        let id = self.observers.insert(Box::new(observer));
        self.order.push(id);
        id
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        self.order.retain(|existing| *existing != id);
        self.observers.remove(id).is_some()
    }

    /// Deliver an event to every observer
    pub fn dispatch(&mut self, event: &E) {
        for id in &self.order {
            if let Some(observer) = self.observers.get_mut(*id) {
                observer(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("observers", &self.observers.len())
            .finish()
    }
}

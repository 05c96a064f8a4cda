//! Publish/subscribe event emission
//!
//! `EventEmitter` is an observer list that widgets embed by composition.
//! Listeners subscribe to an event *kind* and receive every event of that
//! kind in registration order.
//!
//! ```text
//! Widget
//!     ↓ emitter.emit(&event)
//! EventEmitter (listeners indexed by kind)
//!     ↓ registration order
//! Listener callbacks
//! ```
//!
//! The emitter is single-threaded: callbacks are `Rc<dyn Fn(&E)>` since all
//! widget state lives on the UI thread.

use std::hash::Hash;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a registered listener, used to unsubscribe
    pub struct ListenerId;
}

/// An event that can be routed by kind
pub trait Event {
    /// Discriminant used as the subscription key
    type Kind: Copy + Eq + Hash;

    /// The kind of this event
    fn kind(&self) -> Self::Kind;
}

/// Callback invoked for an event
pub type Listener<E> = Rc<dyn Fn(&E)>;

struct Registration<E: Event> {
    kind: E::Kind,
    callback: Listener<E>,
    once: bool,
}

/// Observer list keyed by event kind
pub struct EventEmitter<E: Event> {
    listeners: SlotMap<ListenerId, Registration<E>>,
    by_kind: FxHashMap<E::Kind, SmallVec<[ListenerId; 4]>>,
}

impl<E: Event> Default for EventEmitter<E> {
    fn default() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_kind: FxHashMap::default(),
        }
    }
}

impl<E: Event> EventEmitter<E> {
    /// Create an emitter with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event of `kind`
    pub fn on<F>(&mut self, kind: E::Kind, callback: F) -> ListenerId
    where
        F: Fn(&E) + 'static,
    {
        self.register(kind, Rc::new(callback), false)
    }

    /// Subscribe to the next event of `kind` only
    pub fn once<F>(&mut self, kind: E::Kind, callback: F) -> ListenerId
    where
        F: Fn(&E) + 'static,
    {
        self.register(kind, Rc::new(callback), true)
    }

    fn register(&mut self, kind: E::Kind, callback: Listener<E>, once: bool) -> ListenerId {
        let id = self.listeners.insert(Registration {
            kind,
            callback,
            once,
        });
        self.by_kind.entry(kind).or_default().push(id);
        id
    }

    /// Unsubscribe a listener
    ///
    /// Returns false if the listener was already removed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let Some(registration) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_kind.get_mut(&registration.kind) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.by_kind.remove(&registration.kind);
            }
        }
        true
    }

    /// Deliver an event to its listeners
    ///
    /// Returns the number of listeners that were called.
    pub fn emit(&mut self, event: &E) -> usize {
        let kind = event.kind();
        let Some(ids) = self.by_kind.get(&kind) else {
            return 0;
        };

        // Snapshot so once-listeners can be removed after delivery
        let ids: SmallVec<[ListenerId; 4]> = ids.clone();
        let mut called = 0;
        for id in ids {
            let Some(registration) = self.listeners.get(id) else {
                continue;
            };
            let callback = Rc::clone(&registration.callback);
            let once = registration.once;
            callback(event);
            called += 1;
            if once {
                self.off(id);
            }
        }
        called
    }

    /// Number of listeners subscribed to `kind`
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.by_kind.get(&kind).map(|ids| ids.len()).unwrap_or(0)
    }

    /// Check if there are no listeners at all
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        if !self.listeners.is_empty() {
            tracing::trace!("EventEmitter: detaching {} listeners", self.listeners.len());
        }
        self.listeners.clear();
        self.by_kind.clear();
    }
}

impl<E: Event> std::fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

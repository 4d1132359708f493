// ============================================================================
// REACTIVITY - Listener registry + disposers
// ============================================================================
// Listeners are removed by dropping the `Subscription` returned on register.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Disposer for a registered listener or timer
///
/// Runs its release closure exactly once, either on `unsubscribe()` or on drop.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener<T>)>>,
}

/// Ordered set of listeners notified with `&T`
pub struct Listeners<T> {
    registry: Rc<Registry<T>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a listener, it stays active while the returned subscription lives
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .entries
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let registry: Weak<Registry<T>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Notify every listener in registration order
    pub fn emit(&self, value: &T) {
        // Snapshot first: listeners may subscribe or unsubscribe while running
        let snapshot: Vec<Listener<T>> = self
            .registry
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

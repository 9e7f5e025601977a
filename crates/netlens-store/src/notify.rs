#![forbid(unsafe_code)]

//! Payloadless change signal with synchronous observer dispatch.
//!
//! [`ChangeNotifier`] replaces the host environment's event bus with an
//! explicit observer list: consumers [`subscribe`](ChangeNotifier::subscribe)
//! a callback and re-query the session when it fires. The signal carries no
//! payload — consumers must not assume it identifies the changed record.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: a [`Subscription`] guard stored indefinitely keeps
//!   its callback alive. Dead weak references are pruned lazily on emit.
//! - **Reentrancy**: callbacks are collected before invocation, so a
//!   callback may subscribe further observers; the new observer fires from
//!   the next emit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc = Rc<dyn Fn()>;
type CallbackWeak = Weak<dyn Fn()>;

/// An observer list dispatching a payloadless "changed" signal
/// synchronously in registration order.
#[derive(Default)]
pub struct ChangeNotifier {
    /// Subscribers stored as weak references. Dead entries are pruned on
    /// emit.
    subscribers: RefCell<Vec<CallbackWeak>>,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscriber_count", &self.subscribers.borrow().len())
            .finish()
    }
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run on every emit.
    ///
    /// Returns a [`Subscription`] guard. Dropping the guard unsubscribes
    /// the callback (it will not be called after drop, though its slot may
    /// remain in the list until the next emit prunes it).
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.subscribers.borrow_mut().push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Invoke all live callbacks in registration order and prune dead ones.
    pub fn emit(&self) {
        // Collect live callbacks first so the list borrow is released
        // before any callback runs.
        let callbacks: Vec<CallbackRc> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|w| w.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in &callbacks {
            callback();
        }
    }

    /// Number of registered subscribers (including dead ones not yet
    /// pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the guard drops the strong reference keeping the callback
/// alive, so the corresponding weak entry in the notifier's list fails to
/// upgrade on the next emit.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

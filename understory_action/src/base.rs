// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building blocks for action implementations.
//!
//! Actions that want the optional capabilities usually need the same state:
//! a set of attached listeners and a cancellation latch. Embed these instead of
//! re‑implementing them.
//!
//! ```
//! use core::convert::Infallible;
//! use std::rc::Rc;
//! use understory_action::action::{Action, Cancelable, NotifyingAction, SharedListener};
//! use understory_action::base::{CancelFlag, FiredListeners};
//!
//! #[derive(Default)]
//! struct Archive {
//!     listeners: FiredListeners<str, u32>,
//!     canceled: CancelFlag,
//! }
//!
//! impl Action<(), str, u32> for Archive {
//!     fn accepts_model(&self, _: &u32) -> bool {
//!         !self.canceled.is_canceled()
//!     }
//!     fn execute(&self, _: &(), view: &str, ty: &str, id: &u32) -> Result<(), Infallible> {
//!         self.listeners.notify(view, ty, id);
//!         Ok(())
//!     }
//!     fn as_cancelable(&self) -> Option<&dyn Cancelable> {
//!         Some(&self.canceled)
//!     }
//!     fn as_notifying(&self) -> Option<&dyn NotifyingAction<str, u32>> {
//!         Some(&self.listeners)
//!     }
//! }
//!
//! let archive = Archive::default();
//! let listener: SharedListener<str, u32> = Rc::new(|_: &str, _: &str, id: &u32| assert_eq!(*id, 7));
//! archive.listeners.add(listener);
//! archive.execute(&(), "row-7", "archive", &7).unwrap();
//! archive.canceled.cancel();
//! assert!(!archive.accepts_model(&7));
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::action::{Cancelable, NotifyingAction, SharedListener};

/// A listener set keyed by handle identity.
///
/// Adding the same handle twice keeps a single entry; removal compares with
/// [`Rc::ptr_eq`]. Implements [`NotifyingAction`] so an action can expose it
/// directly from [`Action::as_notifying`](crate::action::Action::as_notifying).
pub struct FiredListeners<V: ?Sized, M: ?Sized> {
    listeners: RefCell<Vec<SharedListener<V, M>>>,
}

impl<V: ?Sized, M: ?Sized> Default for FiredListeners<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized, M: ?Sized> FiredListeners<V, M> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Attaches `listener` unless that handle is already attached.
    pub fn add(&self, listener: SharedListener<V, M>) {
        let mut listeners = self.listeners.borrow_mut();
        if !listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            listeners.push(listener);
        }
    }

    /// Detaches `listener`. Returns whether it was attached.
    pub fn remove(&self, listener: &SharedListener<V, M>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| !Rc::ptr_eq(l, listener));
        listeners.len() != before
    }

    /// Returns whether `listener` is attached.
    pub fn contains(&self, listener: &SharedListener<V, M>) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|l| Rc::ptr_eq(l, listener))
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Returns `true` if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Notifies every attached listener in attach order.
    ///
    /// Iterates a snapshot, so listeners may attach or detach during the call.
    pub fn notify(&self, view: &V, action_type: &str, model: &M) {
        let snapshot: Vec<_> = self.listeners.borrow().iter().cloned().collect();
        for listener in snapshot {
            listener.on_action_fired(view, action_type, model);
        }
    }
}

impl<V: ?Sized, M: ?Sized> NotifyingAction<V, M> for FiredListeners<V, M> {
    fn add_fired_listener(&self, listener: SharedListener<V, M>) {
        self.add(listener);
    }

    fn remove_fired_listener(&self, listener: &SharedListener<V, M>) {
        self.remove(listener);
    }
}

impl<V: ?Sized, M: ?Sized> fmt::Debug for FiredListeners<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiredListeners")
            .field("len", &self.len())
            .finish()
    }
}

/// A one-way cancellation latch.
///
/// Implements [`Cancelable`]; actions check [`is_canceled`](Self::is_canceled)
/// before starting or resuming work.
#[derive(Debug, Default)]
pub struct CancelFlag {
    canceled: Cell<bool>,
}

impl CancelFlag {
    /// Creates an armed flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether [`cancel`](Cancelable::cancel) has been called since the last reset.
    pub fn is_canceled(&self) -> bool {
        self.canceled.get()
    }

    /// Re-arms the flag.
    pub fn reset(&self) {
        self.canceled.set(false);
    }
}

impl Cancelable for CancelFlag {
    fn cancel(&self) {
        self.canceled.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn tagged(log: &Log, tag: &'static str) -> SharedListener<(), u32> {
        let log = Rc::clone(log);
        Rc::new(move |_: &(), _: &str, _: &u32| log.borrow_mut().push(tag))
    }

    #[test]
    fn add_is_idempotent_per_handle() {
        let log = Log::default();
        let set = FiredListeners::new();
        let a = tagged(&log, "a");
        set.add(Rc::clone(&a));
        set.add(Rc::clone(&a));
        assert_eq!(set.len(), 1, "same handle attaches once");
        set.add(tagged(&log, "a"));
        assert_eq!(set.len(), 2, "a fresh handle is a different listener");
    }

    #[test]
    fn remove_by_identity() {
        let log = Log::default();
        let set = FiredListeners::new();
        let a = tagged(&log, "a");
        let b = tagged(&log, "b");
        set.add(Rc::clone(&a));
        set.add(Rc::clone(&b));
        assert!(set.remove(&a));
        assert!(!set.remove(&a), "second removal is a no-op");
        assert!(!set.contains(&a));
        assert!(set.contains(&b));
        set.notify(&(), "save", &1);
        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn notify_runs_in_attach_order() {
        let log = Log::default();
        let set = FiredListeners::new();
        set.add(tagged(&log, "first"));
        set.add(tagged(&log, "second"));
        set.notify(&(), "save", &1);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn listener_may_detach_itself_while_notified() {
        let set: Rc<FiredListeners<(), u32>> = Rc::new(FiredListeners::new());
        let slot: Rc<RefCell<Option<SharedListener<(), u32>>>> = Rc::default();
        let hits = Rc::new(Cell::new(0_u32));
        let once: SharedListener<(), u32> = {
            let set = Rc::clone(&set);
            let slot = Rc::clone(&slot);
            let hits = Rc::clone(&hits);
            Rc::new(move |_: &(), _: &str, _: &u32| {
                hits.set(hits.get() + 1);
                if let Some(me) = slot.borrow_mut().take() {
                    set.remove(&me);
                }
            })
        };
        *slot.borrow_mut() = Some(Rc::clone(&once));
        set.add(once);
        set.notify(&(), "save", &1);
        set.notify(&(), "save", &1);
        assert_eq!(hits.get(), 1, "listener detached after first call");
        assert!(set.is_empty());
    }

    #[test]
    fn cancel_flag_latches_until_reset() {
        let flag = CancelFlag::new();
        assert!(!flag.is_canceled());
        flag.cancel();
        flag.cancel();
        assert!(flag.is_canceled());
        flag.reset();
        assert!(!flag.is_canceled());
    }
}

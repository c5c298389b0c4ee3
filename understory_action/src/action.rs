// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: actions, their optional capabilities, interceptors, and listeners.
//!
//! ## Overview
//!
//! The [router](crate::router::ActionRouter) never inspects concrete action types.
//! Everything it needs is expressed here:
//!
//! - [`Action`] filters models and executes.
//! - [`Cancelable`] and [`NotifyingAction`] are optional capabilities an action
//!   exposes through [`Action::as_cancelable`] and [`Action::as_notifying`].
//! - [`Interceptor`] vetoes a dispatch before any action is examined.
//! - [`FiredListener`] receives completion notifications from notifying actions.
//!
//! Context, view, and model are generic (`C`, `V`, `M`) and may be unsized, so a
//! toolkit can route `dyn Any` models or borrowed view handles directly.

use alloc::rc::Rc;
use core::convert::Infallible;

/// A unit of behavior bound to one or more action types.
///
/// `E` is the error an action may return from [`execute`](Self::execute); the
/// router forwards it to the caller unchanged.
pub trait Action<C: ?Sized, V: ?Sized, M: ?Sized, E = Infallible> {
    /// Returns whether this action is willing to handle `model`.
    ///
    /// Consulted for every matching registration before [`execute`](Self::execute).
    fn accepts_model(&self, model: &M) -> bool;

    /// Runs the action.
    ///
    /// Expected to return promptly; long-running work belongs to the action, not the router.
    fn execute(&self, context: &C, view: &V, action_type: &str, model: &M) -> Result<(), E>;

    /// Exposes the [`Cancelable`] capability, if implemented.
    fn as_cancelable(&self) -> Option<&dyn Cancelable> {
        None
    }

    /// Exposes the [`NotifyingAction`] capability, if implemented.
    fn as_notifying(&self) -> Option<&dyn NotifyingAction<V, M>> {
        None
    }
}

/// Reference-counted action handle stored by the router.
///
/// The same action may back several registrations.
pub type SharedAction<C, V, M, E = Infallible> = Rc<dyn Action<C, V, M, E>>;

/// Best-effort abort signal for actions that hold pending work.
pub trait Cancelable {
    /// Signals the action to stop and release what it holds.
    fn cancel(&self);
}

/// Completion callback invoked by notifying actions after they succeed.
pub trait FiredListener<V: ?Sized, M: ?Sized> {
    /// Called once an action has finished handling `model` for `view`.
    fn on_action_fired(&self, view: &V, action_type: &str, model: &M);
}

impl<V: ?Sized, M: ?Sized, F> FiredListener<V, M> for F
where
    F: Fn(&V, &str, &M),
{
    fn on_action_fired(&self, view: &V, action_type: &str, model: &M) {
        self(view, action_type, model);
    }
}

/// Shared fired-listener handle. Identity (`Rc::ptr_eq`) is used for detach.
pub type SharedListener<V, M> = Rc<dyn FiredListener<V, M>>;

/// Actions that can push completion events to a [`FiredListener`].
///
/// See [`FiredListeners`](crate::base::FiredListeners) for a ready-made listener set.
pub trait NotifyingAction<V: ?Sized, M: ?Sized> {
    /// Attaches `listener`.
    fn add_fired_listener(&self, listener: SharedListener<V, M>);
    /// Detaches `listener`; a no-op if it is not attached.
    fn remove_fired_listener(&self, listener: &SharedListener<V, M>);
}

/// Veto gate consulted once per dispatch, before any registration is examined.
pub trait Interceptor<C: ?Sized, V: ?Sized, M: ?Sized> {
    /// Returns `true` to swallow the event.
    fn should_intercept(&self, context: &C, view: &V, action_type: &str, model: &M) -> bool;
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, F> Interceptor<C, V, M> for F
where
    F: Fn(&C, &V, &str, &M) -> bool,
{
    fn should_intercept(&self, context: &C, view: &V, action_type: &str, model: &M) -> bool {
        self(context, view, action_type, model)
    }
}

/// Views that carry the context their actions run in.
///
/// Used by [`ActionRouter::on_click`](crate::router::ActionRouter::on_click).
pub trait HasContext<C: ?Sized> {
    /// Returns the context this view belongs to.
    fn context(&self) -> &C;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Plain;

    impl Action<(), (), u32> for Plain {
        fn accepts_model(&self, model: &u32) -> bool {
            *model > 0
        }

        fn execute(&self, _: &(), _: &(), _: &str, _: &u32) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn capabilities_default_to_absent() {
        let a = Plain;
        assert!(a.as_cancelable().is_none(), "plain action is not cancelable");
        assert!(a.as_notifying().is_none(), "plain action does not notify");
        assert!(a.accepts_model(&1));
        assert!(!a.accepts_model(&0));
    }

    #[test]
    fn closures_are_interceptors() {
        let veto = |_: &(), _: &(), t: &str, _: &u32| t == "save";
        assert!(veto.should_intercept(&(), &(), "save", &1));
        assert!(!veto.should_intercept(&(), &(), "delete", &1));
    }

    #[test]
    fn closures_are_listeners() {
        let seen = Cell::new(0_u32);
        let listener = |_: &(), _: &str, m: &u32| seen.set(seen.get() + *m);
        listener.on_action_fired(&(), "save", &3);
        listener.on_action_fired(&(), "save", &4);
        assert_eq!(seen.get(), 7);
    }
}

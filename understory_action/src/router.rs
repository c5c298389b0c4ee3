// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Holds an ordered list of [`Registration`]s and fires the ones matching an event.
//! A dispatch passes through two gates before any action runs:
//!
//! 1. No view, no dispatch.
//! 2. The [`Interceptor`], if set, may veto the event.
//!
//! Surviving events are offered to every registration in insertion order.
//! A registration fires when its [`ActionType`] matches and its action accepts the model.
//! All matches fire; there is no first-match short circuit.
//!
//! ## Errors
//!
//! The router defines no errors of its own. The first action that fails stops
//! the dispatch and its error is returned to the caller; actions registered
//! after it do not run for that event.
//!
//! ## Threading
//!
//! Handles are [`Rc`], so a router is neither `Send` nor `Sync`. Drive it from the UI thread.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

use tracing::{debug, trace};

use crate::action::{Action, HasContext, Interceptor, SharedAction, SharedListener};
use crate::types::{ActionType, DispatchOutcome, Registration};

/// Routes fired UI events to registered actions.
///
/// ## Usage
///
/// - Construct with [`ActionRouter::builder`], registering actions in the order they should run.
/// - Call [`ActionRouter::dispatch`] (or [`ActionRouter::on_click`] when views carry their
///   context) for each click.
/// - Call [`ActionRouter::cancel_all`] when the owning screen is torn down.
///
/// Registrations are fixed once built; only the listener and interceptor can be replaced.
pub struct ActionRouter<C: ?Sized, V: ?Sized, M: ?Sized, E = Infallible> {
    registrations: Vec<Registration<C, V, M, E>>,
    fired_listener: Option<SharedListener<V, M>>,
    interceptor: Option<Box<dyn Interceptor<C, V, M>>>,
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> fmt::Debug for ActionRouter<C, V, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRouter")
            .field("registrations", &self.registrations)
            .field("fired_listener", &self.fired_listener.is_some())
            .field("interceptor", &self.interceptor.is_some())
            .finish()
    }
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> ActionRouter<C, V, M, E> {
    /// Start configuring a router.
    pub fn builder() -> ActionRouterBuilder<C, V, M, E> {
        ActionRouterBuilder::new()
    }

    /// Create a router over `registrations` with no listener and no interceptor.
    pub fn new(registrations: Vec<Registration<C, V, M, E>>) -> Self {
        Self {
            registrations,
            fired_listener: None,
            interceptor: None,
        }
    }

    /// Registrations in dispatch order.
    pub fn registrations(&self) -> &[Registration<C, V, M, E>] {
        &self.registrations
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// The active fired-listener.
    pub fn fired_listener(&self) -> Option<&SharedListener<V, M>> {
        self.fired_listener.as_ref()
    }

    /// Returns whether an interceptor is installed.
    pub fn has_interceptor(&self) -> bool {
        self.interceptor.is_some()
    }

    /// Returns whether a dispatch of `action_type` would reach at least one registration.
    ///
    /// Wildcard registrations count. Model acceptance is not consulted.
    pub fn can_handle(&self, action_type: &str) -> bool {
        self.registrations
            .iter()
            .any(|r| r.action_type.matches(action_type))
    }

    /// Returns whether some registration carries exactly `action_type`.
    ///
    /// Unlike [`can_handle`](Self::can_handle), [`ActionType::Wildcard`] only
    /// equals itself here.
    pub fn is_registered(&self, action_type: &ActionType) -> bool {
        self.registrations
            .iter()
            .any(|r| r.action_type == *action_type)
    }

    /// Fire `action_type` for `model` on `view`.
    ///
    /// Returns [`DispatchOutcome::Skipped`] without consulting anything when `view`
    /// is `None`, and [`DispatchOutcome::Intercepted`] when the interceptor vetoes.
    /// Otherwise runs every matching registration that accepts `model`, in order,
    /// and reports how many ran.
    pub fn dispatch(
        &self,
        context: &C,
        view: Option<&V>,
        action_type: &str,
        model: &M,
    ) -> Result<DispatchOutcome, E> {
        let Some(view) = view else {
            trace!(action_type, "no view; dispatch skipped");
            return Ok(DispatchOutcome::Skipped);
        };

        if let Some(interceptor) = &self.interceptor
            && interceptor.should_intercept(context, view, action_type, model)
        {
            debug!(action_type, "dispatch intercepted");
            return Ok(DispatchOutcome::Intercepted);
        }

        let mut fired = 0;
        for (index, registration) in self.registrations.iter().enumerate() {
            if !registration.action_type.matches(action_type) {
                continue;
            }
            if !registration.action.accepts_model(model) {
                trace!(action_type, index, "model rejected");
                continue;
            }
            trace!(action_type, index, "executing action");
            registration
                .action
                .execute(context, view, action_type, model)?;
            fired += 1;
        }

        debug!(action_type, fired, "dispatch handled");
        Ok(DispatchOutcome::Handled(fired))
    }

    /// Click entry point for views that know their context.
    ///
    /// Equivalent to [`dispatch`](Self::dispatch) with the context taken from `view`.
    pub fn on_click(
        &self,
        view: Option<&V>,
        action_type: &str,
        model: &M,
    ) -> Result<DispatchOutcome, E>
    where
        V: HasContext<C>,
    {
        let Some(view) = view else {
            trace!(action_type, "no view; click ignored");
            return Ok(DispatchOutcome::Skipped);
        };
        self.dispatch(view.context(), Some(view), action_type, model)
    }

    /// Signal every cancelable action to stop, in registration order.
    ///
    /// Registrations stay in place; what a canceled action does afterwards is up to it.
    pub fn cancel_all(&self) {
        let mut canceled = 0_usize;
        for registration in &self.registrations {
            if let Some(cancelable) = registration.action.as_cancelable() {
                cancelable.cancel();
                canceled += 1;
            }
        }
        debug!(canceled, "canceled actions");
    }

    /// Replace the fired-listener and rebind it on every notifying action.
    ///
    /// The previous listener, if any, is detached first.
    pub fn set_fired_listener(&mut self, listener: Option<SharedListener<V, M>>) {
        let previous = core::mem::replace(&mut self.fired_listener, listener);
        let mut rebound = 0_usize;
        for registration in &self.registrations {
            let Some(notifying) = registration.action.as_notifying() else {
                continue;
            };
            if let Some(old) = &previous {
                notifying.remove_fired_listener(old);
            }
            if let Some(new) = &self.fired_listener {
                notifying.add_fired_listener(Rc::clone(new));
            }
            rebound += 1;
        }
        debug!(
            rebound,
            attached = self.fired_listener.is_some(),
            "fired listener replaced"
        );
    }

    /// Replace the interceptor.
    pub fn set_interceptor(&mut self, interceptor: Option<Box<dyn Interceptor<C, V, M>>>) {
        self.interceptor = interceptor;
    }
}

/// Collects registrations, a fired-listener, and an interceptor for an [`ActionRouter`].
pub struct ActionRouterBuilder<C: ?Sized, V: ?Sized, M: ?Sized, E = Infallible> {
    registrations: Vec<Registration<C, V, M, E>>,
    fired_listener: Option<SharedListener<V, M>>,
    interceptor: Option<Box<dyn Interceptor<C, V, M>>>,
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> Default for ActionRouterBuilder<C, V, M, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> fmt::Debug for ActionRouterBuilder<C, V, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRouterBuilder")
            .field("registrations", &self.registrations)
            .field("fired_listener", &self.fired_listener.is_some())
            .field("interceptor", &self.interceptor.is_some())
            .finish()
    }
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> ActionRouterBuilder<C, V, M, E> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            fired_listener: None,
            interceptor: None,
        }
    }

    /// Register `action` for `action_type`.
    ///
    /// Pass [`ActionType::Wildcard`] (or `None::<&str>`) to match every type.
    pub fn action<A>(self, action_type: impl Into<ActionType>, action: A) -> Self
    where
        A: Action<C, V, M, E> + 'static,
    {
        self.shared_action(action_type, Rc::new(action))
    }

    /// Register an already shared action, e.g. one instance under several types.
    pub fn shared_action(
        mut self,
        action_type: impl Into<ActionType>,
        action: SharedAction<C, V, M, E>,
    ) -> Self {
        self.registrations
            .push(Registration::new(action_type, action));
        self
    }

    /// Set the listener propagated to notifying actions on [`build`](Self::build).
    pub fn fired_listener(mut self, listener: SharedListener<V, M>) -> Self {
        self.fired_listener = Some(listener);
        self
    }

    /// Set the interceptor consulted before each dispatch.
    pub fn interceptor<I>(mut self, interceptor: I) -> Self
    where
        I: Interceptor<C, V, M> + 'static,
    {
        self.interceptor = Some(Box::new(interceptor));
        self
    }

    /// Build the router, applying the listener and interceptor through its setters.
    pub fn build(self) -> ActionRouter<C, V, M, E> {
        let mut router = ActionRouter::new(self.registrations);
        if self.fired_listener.is_some() {
            router.set_fired_listener(self.fired_listener);
        }
        if self.interceptor.is_some() {
            router.set_interceptor(self.interceptor);
        }
        router
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: action types, registrations, and dispatch outcomes.
//!
//! ## Overview
//!
//! These types describe what the [router](crate::router) stores and reports.
//! Matching rules live on [`ActionType`] so the router and downstream
//! toolkits agree on them.

use alloc::rc::Rc;
use alloc::string::String;
use core::convert::Infallible;
use core::fmt;

use crate::action::SharedAction;

/// The type tag a registration answers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Matches any fired type.
    Wildcard,
    /// Matches exactly one fired type.
    Specific(String),
}

impl ActionType {
    /// Returns whether a registration of this type should see an event fired as `fired`.
    #[inline]
    pub fn matches(&self, fired: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Specific(ty) => ty == fired,
        }
    }

    /// Returns the specific tag, or `None` for [`Wildcard`](Self::Wildcard).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Wildcard => None,
            Self::Specific(ty) => Some(ty),
        }
    }

    /// Returns `true` for [`Wildcard`](Self::Wildcard).
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl From<&str> for ActionType {
    fn from(ty: &str) -> Self {
        Self::Specific(ty.into())
    }
}

impl From<String> for ActionType {
    fn from(ty: String) -> Self {
        Self::Specific(ty)
    }
}

impl From<Option<&str>> for ActionType {
    fn from(ty: Option<&str>) -> Self {
        ty.map_or(Self::Wildcard, |ty| Self::Specific(ty.into()))
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Specific(ty) => f.write_str(ty),
        }
    }
}

/// An `(action type, action)` pair held by the router.
///
/// Equality is structural: same type tag and the same action instance.
pub struct Registration<C: ?Sized, V: ?Sized, M: ?Sized, E = Infallible> {
    pub(crate) action_type: ActionType,
    pub(crate) action: SharedAction<C, V, M, E>,
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> Registration<C, V, M, E> {
    /// Pair `action` with `action_type`.
    pub fn new(action_type: impl Into<ActionType>, action: SharedAction<C, V, M, E>) -> Self {
        Self {
            action_type: action_type.into(),
            action,
        }
    }

    /// The type tag.
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// The registered action.
    pub fn action(&self) -> &SharedAction<C, V, M, E> {
        &self.action
    }
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> Clone for Registration<C, V, M, E> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            action: Rc::clone(&self.action),
        }
    }
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> PartialEq for Registration<C, V, M, E> {
    fn eq(&self, other: &Self) -> bool {
        self.action_type == other.action_type && Rc::ptr_eq(&self.action, &other.action)
    }
}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> Eq for Registration<C, V, M, E> {}

impl<C: ?Sized, V: ?Sized, M: ?Sized, E> fmt::Debug for Registration<C, V, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("action_type", &self.action_type)
            .finish_non_exhaustive()
    }
}

/// What a dispatch did.
///
/// Returned by [`ActionRouter::dispatch`](crate::router::ActionRouter::dispatch).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// No view was supplied; nothing was consulted.
    Skipped,
    /// The interceptor vetoed the event; no action ran.
    Intercepted,
    /// Registrations were scanned; carries how many actions executed (possibly zero).
    Handled(usize),
}

impl DispatchOutcome {
    /// Number of actions that executed.
    pub fn fired(self) -> usize {
        match self {
            Self::Handled(n) => n,
            Self::Skipped | Self::Intercepted => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use alloc::string::ToString;

    struct Noop;

    impl Action<(), (), ()> for Noop {
        fn accepts_model(&self, _: &()) -> bool {
            true
        }

        fn execute(&self, _: &(), _: &(), _: &str, _: &()) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn wildcard_matches_everything() {
        assert!(ActionType::Wildcard.matches("save"));
        assert!(ActionType::Wildcard.matches(""));
    }

    #[test]
    fn specific_matches_only_itself() {
        let ty = ActionType::from("save");
        assert!(ty.matches("save"));
        assert!(!ty.matches("Save"), "matching is case sensitive");
        assert!(!ty.matches("delete"));
    }

    #[test]
    fn none_converts_to_wildcard() {
        assert_eq!(ActionType::from(None), ActionType::Wildcard);
        assert_eq!(
            ActionType::from(Some("open")),
            ActionType::Specific("open".to_string())
        );
        assert_eq!(ActionType::Wildcard.as_str(), None);
        assert_eq!(ActionType::from("open").as_str(), Some("open"));
    }

    #[test]
    fn display_uses_star_for_wildcard() {
        assert_eq!(ActionType::Wildcard.to_string(), "*");
        assert_eq!(ActionType::from("save").to_string(), "save");
    }

    #[test]
    fn registration_equality_uses_action_identity() {
        let a: SharedAction<(), (), ()> = Rc::new(Noop);
        let b: SharedAction<(), (), ()> = Rc::new(Noop);
        let r1 = Registration::new("save", Rc::clone(&a));
        let r2 = Registration::new("save", Rc::clone(&a));
        let r3 = Registration::new("save", b);
        let r4 = Registration::new(ActionType::Wildcard, a);
        assert_eq!(r1, r2);
        assert_ne!(r1, r3, "distinct action instances differ");
        assert_ne!(r1, r4, "type tags differ");
        assert_eq!(r1.clone(), r1);
    }

    #[test]
    fn outcome_fired_counts() {
        assert_eq!(DispatchOutcome::Skipped.fired(), 0);
        assert_eq!(DispatchOutcome::Intercepted.fired(), 0);
        assert_eq!(DispatchOutcome::Handled(3).fired(), 3);
    }
}

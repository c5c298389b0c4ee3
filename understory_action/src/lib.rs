// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Action: a deterministic, `no_std` router from UI clicks to named actions.
//!
//! ## Overview
//!
//! List rows and other widgets tag their clicks with an *action type* string and a model.
//! This crate decides which registered [`Action`](crate::action::Action)s run for such a click
//! and runs them. It does not render, bind adapters, or implement any action itself.
//!
//! ## Routing
//!
//! An [`ActionRouter`](crate::router::ActionRouter) holds `(type, action)`
//! [`Registration`](crate::types::Registration)s in insertion order. A dispatch:
//!
//! 1) is skipped when no view is supplied;
//! 2) is vetoed when the [`Interceptor`](crate::action::Interceptor) returns `true`;
//! 3) otherwise runs, in order, every registration whose [`ActionType`](crate::types::ActionType)
//!    matches and whose action accepts the model. `Wildcard` registrations match every type.
//!
//! Every match runs, not just the first. An action error aborts the dispatch and is returned
//! to the caller as is.
//!
//! ## Capabilities
//!
//! Actions may additionally expose [`Cancelable`](crate::action::Cancelable), swept by
//! [`ActionRouter::cancel_all`](crate::router::ActionRouter::cancel_all) when a screen goes away,
//! and [`NotifyingAction`](crate::action::NotifyingAction), which receives the router's single
//! [`FiredListener`](crate::action::FiredListener) whenever it is replaced.
//! [`base`](crate::base) has ready-made parts for both.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_action::action::Action;
//! use understory_action::router::ActionRouter;
//! use understory_action::types::{ActionType, DispatchOutcome};
//!
//! struct Record {
//!     name: &'static str,
//!     accepts: bool,
//!     log: Rc<RefCell<Vec<&'static str>>>,
//! }
//!
//! impl Action<(), str, u32> for Record {
//!     fn accepts_model(&self, _: &u32) -> bool {
//!         self.accepts
//!     }
//!     fn execute(&self, _: &(), _: &str, _: &str, _: &u32) -> Result<(), Infallible> {
//!         self.log.borrow_mut().push(self.name);
//!         Ok(())
//!     }
//! }
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let rec = |name, accepts| Record { name, accepts, log: log.clone() };
//! let router: ActionRouter<(), str, u32> = ActionRouter::builder()
//!     .action("save", rec("A", true))
//!     .action(ActionType::Wildcard, rec("B", true))
//!     .action("save", rec("C", false))
//!     .build();
//!
//! assert_eq!(router.dispatch(&(), Some("row-1"), "save", &1), Ok(DispatchOutcome::Handled(2)));
//! assert_eq!(*log.borrow(), ["A", "B"]);
//!
//! log.borrow_mut().clear();
//! router.dispatch(&(), Some("row-1"), "delete", &1).unwrap();
//! assert_eq!(*log.borrow(), ["B"]);
//! ```
//!
//! ## Threading
//!
//! Shared handles are `Rc`; routers are meant to live on the UI thread and are not `Send`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod action;
pub mod base;
pub mod router;
pub mod types;

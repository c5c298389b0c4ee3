// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action lifecycle: opaque models, fired-listeners, errors, and teardown.
//!
//! Models are `dyn Any` so each action picks the row types it understands.
//! Notifying actions report completions to the screen's listener, a failing
//! action surfaces its error at the click site, and `cancel_all` runs when the
//! screen goes away.
//!
//! Run:
//! - `RUST_LOG=understory_action=debug cargo run -p understory_demos --example action_lifecycle`

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use understory_action::action::{
    Action, Cancelable, HasContext, NotifyingAction, SharedListener,
};
use understory_action::base::{CancelFlag, FiredListeners};
use understory_action::router::ActionRouter;

type Model = dyn Any;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("message {0} is pinned and cannot be archived")]
    Pinned(u32),
    #[error("screen {0} was closed")]
    Closed(&'static str),
}

#[derive(Debug)]
struct Screen {
    name: &'static str,
}

#[derive(Debug)]
struct Row {
    screen: Rc<Screen>,
    index: usize,
}

impl HasContext<Screen> for Row {
    fn context(&self) -> &Screen {
        &self.screen
    }
}

#[derive(Debug)]
struct Message {
    id: u32,
    pinned: bool,
}

#[derive(Debug)]
struct Folder(&'static str);

/// Queues messages for archiving until flushed or canceled.
#[derive(Default)]
struct Archive {
    pending: RefCell<Vec<u32>>,
    listeners: FiredListeners<Row, Model>,
    canceled: CancelFlag,
}

impl Archive {
    fn flush(&self) -> Vec<u32> {
        self.pending.take()
    }
}

impl Action<Screen, Row, Model, DemoError> for Archive {
    fn accepts_model(&self, model: &Model) -> bool {
        model.is::<Message>()
    }

    fn execute(&self, screen: &Screen, view: &Row, ty: &str, model: &Model) -> Result<(), DemoError> {
        if self.canceled.is_canceled() {
            return Err(DemoError::Closed(screen.name));
        }
        let Some(msg) = model.downcast_ref::<Message>() else {
            return Ok(());
        };
        if msg.pinned {
            return Err(DemoError::Pinned(msg.id));
        }
        self.pending.borrow_mut().push(msg.id);
        self.listeners.notify(view, ty, model);
        Ok(())
    }

    fn as_cancelable(&self) -> Option<&dyn Cancelable> {
        Some(self)
    }

    fn as_notifying(&self) -> Option<&dyn NotifyingAction<Row, Model>> {
        Some(&self.listeners)
    }
}

impl Cancelable for Archive {
    fn cancel(&self) {
        let dropped = self.pending.take();
        self.canceled.cancel();
        warn!(dropped = dropped.len(), "pending archives dropped");
    }
}

/// Opens folders.
#[derive(Default)]
struct OpenFolder {
    listeners: FiredListeners<Row, Model>,
}

impl Action<Screen, Row, Model, DemoError> for OpenFolder {
    fn accepts_model(&self, model: &Model) -> bool {
        model.is::<Folder>()
    }

    fn execute(&self, screen: &Screen, view: &Row, ty: &str, model: &Model) -> Result<(), DemoError> {
        if let Some(folder) = model.downcast_ref::<Folder>() {
            println!("  {} opens folder {}", screen.name, folder.0);
            self.listeners.notify(view, ty, model);
        }
        Ok(())
    }

    fn as_notifying(&self) -> Option<&dyn NotifyingAction<Row, Model>> {
        Some(&self.listeners)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let screen = Rc::new(Screen { name: "inbox" });
    let rows: Vec<Row> = (0..3)
        .map(|index| Row {
            screen: Rc::clone(&screen),
            index,
        })
        .collect();

    let completed: Rc<RefCell<Vec<String>>> = Rc::default();
    let listener: SharedListener<Row, Model> = {
        let completed = Rc::clone(&completed);
        Rc::new(move |row: &Row, ty: &str, _: &Model| {
            completed.borrow_mut().push(format!("{ty}@{}", row.index));
        })
    };

    // One archive instance answers both the button and the swipe gesture.
    let archive = Rc::new(Archive::default());
    let mut router: ActionRouter<Screen, Row, Model, DemoError> = ActionRouter::builder()
        .shared_action("archive", archive.clone())
        .shared_action("swipe", archive.clone())
        .action("open", OpenFolder::default())
        .fired_listener(listener)
        .build();

    let hello = Message {
        id: 1,
        pinned: false,
    };
    let pinned = Message {
        id: 2,
        pinned: true,
    };
    let drafts = Folder("drafts");
    let clicks: [(usize, &str, &Model); 5] = [
        (0, "archive", &hello as &Model),
        (1, "open", &drafts as &Model),
        (2, "swipe", &pinned as &Model),
        (1, "archive", &drafts as &Model),
        (9, "archive", &hello as &Model),
    ];

    println!("== Clicks ==");
    for (index, ty, model) in clicks {
        match router.on_click(rows.get(index), ty, model) {
            Ok(outcome) => info!(ty, index, ?outcome, "click handled"),
            Err(err) => warn!(ty, index, %err, "click failed"),
        }
    }
    println!("completed: {:?}", completed.borrow());
    println!("archived: {:?}", archive.flush());

    // The screen stops listening but keeps working.
    router.set_fired_listener(None);
    let later = Message {
        id: 3,
        pinned: false,
    };
    let _ = router.on_click(rows.first(), "archive", &later as &Model);
    println!("completed after detach: {:?}", completed.borrow());

    println!("== Teardown ==");
    router.cancel_all();
    if let Err(err) = router.on_click(rows.first(), "archive", &hello as &Model) {
        println!("  after teardown: {err}");
    }
}

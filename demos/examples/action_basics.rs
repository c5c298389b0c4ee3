// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action router basics.
//!
//! Registers typed and wildcard actions for list rows, shows the model filter,
//! and vetoes some clicks with an interceptor.
//!
//! Run:
//! - `RUST_LOG=understory_action=trace cargo run -p understory_demos --example action_basics`

use core::convert::Infallible;

use tracing_subscriber::EnvFilter;
use understory_action::action::Action;
use understory_action::router::ActionRouter;
use understory_action::types::ActionType;

#[derive(Debug)]
struct Contact {
    name: &'static str,
    starred: bool,
}

/// A row in a contact list.
#[derive(Debug)]
struct Row(usize);

/// Prints a line; accepts contacts passing `filter`.
struct Say {
    what: &'static str,
    filter: fn(&Contact) -> bool,
}

impl Action<(), Row, Contact> for Say {
    fn accepts_model(&self, model: &Contact) -> bool {
        (self.filter)(model)
    }

    fn execute(&self, _: &(), view: &Row, ty: &str, model: &Contact) -> Result<(), Infallible> {
        println!("  [{ty}] row {} -> {} {}", view.0, self.what, model.name);
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let build = || {
        ActionRouter::<(), Row, Contact>::builder()
            .action(
                "save",
                Say {
                    what: "saving",
                    filter: |_| true,
                },
            )
            .action(
                ActionType::Wildcard,
                Say {
                    what: "auditing",
                    filter: |_| true,
                },
            )
            .action(
                "save",
                Say {
                    what: "syncing starred",
                    filter: |c| c.starred,
                },
            )
    };

    let ada = Contact {
        name: "Ada",
        starred: false,
    };
    let grace = Contact {
        name: "Grace",
        starred: true,
    };

    let router = build().build();
    println!("== Dispatch ==");
    for (row, ty, model) in [(0, "save", &ada), (1, "save", &grace), (0, "delete", &ada)] {
        let out = router
            .dispatch(&(), Some(&Row(row)), ty, model)
            .unwrap_or_else(|never| match never {});
        println!("  => {out:?}");
    }
    println!("can_handle(\"open\") = {}", router.can_handle("open"));
    println!(
        "is_registered(\"open\") = {}",
        router.is_registered(&"open".into())
    );

    // Read-only mode: swallow every save.
    let read_only = build()
        .interceptor(|_: &(), _: &Row, ty: &str, _: &Contact| ty == "save")
        .build();
    println!("== Read-only ==");
    for ty in ["save", "delete"] {
        let out = read_only
            .dispatch(&(), Some(&Row(1)), ty, &grace)
            .unwrap_or_else(|never| match never {});
        println!("  {ty} => {out:?}");
    }
}

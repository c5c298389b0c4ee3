// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_action::action::{Action, Cancelable};
use understory_action::router::ActionRouter;
use understory_action::types::ActionType;

struct Count {
    hits: Rc<Cell<u64>>,
    even_only: bool,
}

impl Action<(), u32, u64> for Count {
    fn accepts_model(&self, model: &u64) -> bool {
        !self.even_only || model % 2 == 0
    }

    fn execute(&self, _: &(), _: &u32, _: &str, _: &u64) -> Result<(), Infallible> {
        self.hits.set(self.hits.get() + 1);
        Ok(())
    }

    fn as_cancelable(&self) -> Option<&dyn Cancelable> {
        Some(self)
    }
}

impl Cancelable for Count {
    fn cancel(&self) {
        self.hits.set(0);
    }
}

/// `n` registrations cycling through eight types, every fourth one a wildcard.
fn build(n: usize, hits: &Rc<Cell<u64>>) -> ActionRouter<(), u32, u64> {
    let mut builder = ActionRouter::builder();
    for i in 0..n {
        let ty = if i % 4 == 3 {
            ActionType::Wildcard
        } else {
            ActionType::from(format!("type-{}", i % 8))
        };
        builder = builder.action(
            ty,
            Count {
                hits: Rc::clone(hits),
                even_only: i % 2 == 1,
            },
        );
    }
    builder.build()
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for &n in &[4_usize, 32, 256] {
        let hits = Rc::new(Cell::new(0));
        let router = build(n, &hits);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("matched_n{n}"), |b| {
            let mut model = 0_u64;
            b.iter(|| {
                model = model.wrapping_add(1);
                black_box(
                    router
                        .dispatch(&(), Some(&7), black_box("type-2"), &model)
                        .unwrap(),
                )
            });
        });

        group.bench_function(format!("wildcard_only_n{n}"), |b| {
            b.iter(|| {
                black_box(
                    router
                        .dispatch(&(), Some(&7), black_box("unregistered"), &2)
                        .unwrap(),
                )
            });
        });

        group.bench_function(format!("is_registered_miss_n{n}"), |b| {
            b.iter(|| black_box(router.is_registered(&ActionType::from("unregistered"))));
        });

        group.bench_function(format!("cancel_all_n{n}"), |b| {
            b.iter(|| router.cancel_all());
        });
    }
    group.finish();
}

fn bench_intercepted(c: &mut Criterion) {
    let hits = Rc::new(Cell::new(0));
    let mut router = build(256, &hits);
    router.set_interceptor(Some(Box::new(
        |_: &(), _: &u32, ty: &str, _: &u64| ty.starts_with("type-"),
    )));
    c.bench_function("dispatch/intercepted_n256", |b| {
        b.iter(|| {
            black_box(
                router
                    .dispatch(&(), Some(&7), black_box("type-2"), &2)
                    .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_dispatch, bench_intercepted);
criterion_main!(benches);

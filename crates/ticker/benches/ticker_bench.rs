//! Benchmarks for the arm/cancel path and callback dispatch.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use ticker::{ArgSlot, TickCallback, Ticker, TickerArg};
use ticker_test_helpers::{ManualTimerService, must};

fn noop() {}

fn consume(v: u16) {
    black_box(v);
}

fn bench_arm_cancel(c: &mut Criterion) {
    let service = ManualTimerService::new();

    c.bench_function("arm_periodic_then_cancel", |b| {
        let mut ticker = Ticker::new(&service);
        b.iter(|| {
            must(ticker.arm_periodic(black_box(10u32), noop));
            ticker.cancel();
        });
    });

    c.bench_function("rearm_with_arg", |b| {
        let mut ticker = Ticker::new(&service);
        b.iter(|| {
            must(ticker.arm_once_with_arg(black_box(10u32), consume, black_box(512u16)));
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    c.bench_function("invoke_typed_callback", |b| {
        let callback = TickCallback::typed(consume);
        let slot = 512u16.into_slot();
        b.iter(|| callback.invoke(black_box(slot)));
    });

    c.bench_function("advance_one_period", |b| {
        let service = ManualTimerService::new();
        let mut ticker = Ticker::new(&service);
        must(ticker.arm_periodic(1u32, noop));
        b.iter(|| service.advance(black_box(Duration::from_millis(1))));
        ticker.cancel();
    });

    c.bench_function("slot_conversion", |b| {
        b.iter(|| f32::from_slot(black_box(ArgSlot::new(0x4049_0FDB))));
    });
}

criterion_group!(benches, bench_arm_cancel, bench_dispatch);
criterion_main!(benches);

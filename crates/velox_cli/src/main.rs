//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `velox_core` linkage.
//! - Drive one scripted session on a manual clock so output stays
//!   deterministic across runs.

use std::rc::Rc;
use velox_core::app::KeyInput;
use velox_core::{
    AppBuilder, AppController, Clock, HostEvent, ManualClock, MemoryKvStore, MockDataSource,
    PageId,
};

const EPOCH_BASE_MS: i64 = 1_791_979_200_000;

fn main() {
    println!("velox_core ping={}", velox_core::ping());
    println!("velox_core version={}", velox_core::core_version());

    if let Err(err) = run_session() {
        eprintln!("velox_core session=error error={err}");
        std::process::exit(1);
    }
}

fn run_session() -> Result<(), velox_core::StartupError> {
    let clock = Rc::new(ManualClock::new(EPOCH_BASE_MS));
    let mut app = AppBuilder::new()
        .clock(clock.clone())
        .data_source(Rc::new(MockDataSource::new(EPOCH_BASE_MS)))
        .store(MemoryKvStore::new())
        .seed(42)
        .build()?;

    app.start()?;
    run_for(&mut app, &clock, 1_500);
    report(&app, "ready");

    app.navigate_to(PageId::Analytics);
    run_for(&mut app, &clock, 1_000);
    report(&app, "navigate");

    app.handle_host_event(HostEvent::Key(KeyInput::ctrl('d')));
    app.mark_all_notifications_read();
    report(&app, "interact");

    let cleared = app.shutdown();
    println!("velox_core session=stopped cleared_timers={cleared}");
    Ok(())
}

/// Steps the manual clock through every timer due within `ms`.
fn run_for(app: &mut AppController, clock: &ManualClock, ms: u64) {
    let target = clock.now_ms() + ms;
    while let Some(due) = app.next_timer_due_ms().filter(|due| *due <= target) {
        clock.set(due);
        app.tick();
    }
    clock.set(target);
    app.tick();
}

fn report(app: &AppController, step: &str) {
    let snapshot = app.snapshot();
    println!(
        "velox_core step={step} page={} title=\"{}\" theme={} unread={} toasts={}",
        snapshot.current_page,
        snapshot.document_title,
        snapshot.theme,
        app.notifications().unread_count(),
        snapshot.toasts.len()
    );
}

//! Timing behavior of the delay-simulated loader and the busy-wait helper.

use anyhow::Result;
use core::time::Duration;
use fixtures::{LOAD_MARKER, LoadOutcome, busy_wait, host_page, load_content};
use std::time::Instant;
use tokio::runtime::Runtime;

fn init_logs() {
    let _unused = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();
}

fn text_by_id(doc: &dom::Document, id: &str) -> String {
    doc.element_by_id(id)
        .map(|node| doc.text_content(node))
        .unwrap_or_default()
}

#[test]
fn no_wait_writes_the_marker_before_returning() -> Result<()> {
    init_logs();
    let mut doc = host_page()?;
    let outcome = load_content(&mut doc, None)?;

    // No runtime involved: the marker is already there.
    assert!(matches!(outcome, LoadOutcome::Loaded));
    assert_eq!(text_by_id(&doc, "content"), LOAD_MARKER);
    assert_eq!(text_by_id(&doc, "wait-text"), "Waited 0ms for page to load");
    Ok(())
}

#[test]
fn delayed_load_holds_the_marker_until_completion() -> Result<()> {
    init_logs();
    let mut doc = host_page()?;
    let LoadOutcome::Pending(pending) = load_content(&mut doc, Some(25))? else {
        panic!("a wait duration must schedule a delayed load");
    };

    // The status line renders immediately; the content does not change yet.
    assert_eq!(pending.wait(), Duration::from_millis(25));
    assert_eq!(text_by_id(&doc, "wait-text"), "Waited 25ms for page to load");
    assert_eq!(text_by_id(&doc, "content"), "placeholder");

    let runtime = Runtime::new()?;
    let started = Instant::now();
    runtime.block_on(pending.complete(&mut doc))?;

    assert!(
        started.elapsed() >= Duration::from_millis(25),
        "completion resolved before the timer elapsed"
    );
    assert_eq!(text_by_id(&doc, "content"), LOAD_MARKER);
    Ok(())
}

#[test]
fn busy_wait_blocks_for_at_least_the_requested_time() {
    let started = Instant::now();
    busy_wait(5);
    assert!(started.elapsed() >= Duration::from_millis(5));
}

#[test]
fn busy_wait_with_zero_returns_promptly() {
    let started = Instant::now();
    busy_wait(0);
    // Bounded by the iteration cap, not by the clock.
    assert!(started.elapsed() < Duration::from_secs(10));
}

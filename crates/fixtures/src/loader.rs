//! The delay-simulated loader fixture: an immediate status line plus a
//! synchronous or timer-delayed overwrite of the content node, and the
//! standalone busy-wait helper.

use anyhow::{Error, anyhow};
use core::time::Duration;
use dom::Document;
use std::time::Instant;

use crate::{CONTENT_ID, LOAD_MARKER, WAIT_TEXT_ID};

/// Ceiling on busy-wait loop iterations, in case the clock misbehaves.
const BUSY_WAIT_ITERATION_CAP: u32 = 10_000_000;

/// Result of starting a simulated page load.
#[must_use]
#[derive(Debug)]
pub enum LoadOutcome {
    /// The marker was written synchronously; nothing is outstanding.
    Loaded,
    /// A delayed load was scheduled; await [`PendingLoad::complete`] to
    /// finish it.
    Pending(PendingLoad),
}

/// A scheduled delayed load. Once pending it always completes — there is no
/// cancellation.
#[derive(Debug)]
pub struct PendingLoad {
    wait: Duration,
}

impl PendingLoad {
    /// The requested delay.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Suspend until the timer elapses, then perform the one deferred
    /// mutation: overwrite the content node with the marker.
    ///
    /// # Errors
    /// Returns an error if the host page lost its content node meanwhile.
    pub async fn complete(self, doc: &mut Document) -> Result<(), Error> {
        tokio::time::sleep(self.wait).await;
        write_marker(doc)
    }
}

/// Render the wait status line, then either write the marker immediately
/// (no wait requested) or schedule a delayed load for `wait_ms` milliseconds.
///
/// # Errors
/// Returns an error if the host page lacks a body or the content node.
pub fn load_content(doc: &mut Document, wait_ms: Option<u64>) -> Result<LoadOutcome, Error> {
    let body = doc
        .first_element_by_tag("body")
        .ok_or_else(|| anyhow!("host page has no <body> element"))?;
    let status = doc.create_element("p")?;
    doc.set_attribute(status, "id", WAIT_TEXT_ID)?;
    let text = doc.create_text(&format!(
        "Waited {}ms for page to load",
        wait_ms.unwrap_or(0)
    ));
    doc.append_child(status, text, usize::MAX)?;
    doc.append_child(body, status, usize::MAX)?;

    match wait_ms {
        Some(millis) => Ok(LoadOutcome::Pending(PendingLoad {
            wait: Duration::from_millis(millis),
        })),
        None => {
            write_marker(doc)?;
            Ok(LoadOutcome::Loaded)
        }
    }
}

fn write_marker(doc: &mut Document) -> Result<(), Error> {
    let content = doc
        .element_by_id(CONTENT_ID)
        .ok_or_else(|| anyhow!("host page has no #{CONTENT_ID} element"))?;
    doc.set_text_content(content, LOAD_MARKER)
}

/// Block the calling thread for roughly `milliseconds` by polling a monotonic
/// clock, giving up after a fixed iteration cap. A standalone test utility —
/// never called on a path that must stay responsive.
pub fn busy_wait(milliseconds: u64) {
    let start = Instant::now();
    let limit = Duration::from_millis(milliseconds);
    for _ in 0..BUSY_WAIT_ITERATION_CAP {
        if start.elapsed() > limit {
            break;
        }
    }
}

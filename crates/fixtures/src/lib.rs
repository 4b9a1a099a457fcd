//! Fixture content for a scraper test server: pagination pages and a
//! delay-simulated loader, rendered into a [`dom::Document`] the external
//! harness inspects.
//!
//! Each fixture is stateless; a render overwrites the page's content nodes
//! and appends its navigation links to the body. The exact strings produced
//! here (banner, marker, link file names) are what the harness asserts on.

pub mod loader;
pub mod paginator;
pub mod pages;

pub use loader::{LoadOutcome, PendingLoad, busy_wait, load_content};
pub use paginator::{BoundaryStyle, LinkDescriptor, PaginatorConfig, page_index_from_url};
pub use pages::{host_page, multi_page_static_links, multi_page_with_state};

/// Marker string the harness watches for to detect script-driven content.
pub const LOAD_MARKER: &str = "LOADED-Javascript Line";

/// Id of the host page node that receives the banner (or the load marker).
pub const CONTENT_ID: &str = "content";

/// Id of the host page node that receives the load-completion marker.
pub const SECONDARY_CONTENT_ID: &str = "content2";

/// Id of the status paragraph the delay loader renders immediately.
pub const WAIT_TEXT_ID: &str = "wait-text";

//! The fixture catalog and the host page scaffold the fixtures render into.

use anyhow::Error;
use dom::Document;

use crate::paginator::{BoundaryStyle, PaginatorConfig};
use crate::{CONTENT_ID, SECONDARY_CONTENT_ID};

/// The four-page fixture whose boundary links keep an empty `href`.
pub fn multi_page_static_links() -> PaginatorConfig {
    PaginatorConfig::new("MultiPageJS_STATIC_LINKS", 4, BoundaryStyle::OmitHref)
}

/// The two-page fixture that flags boundary links with a status class.
pub fn multi_page_with_state() -> PaginatorConfig {
    PaginatorConfig::new(
        "MultiPageJS_STATIC_LINKS_WITH_STATE",
        2,
        BoundaryStyle::StatusClass,
    )
}

/// Build the document skeleton every fixture expects from its host page:
/// a body holding the `#content` and `#content2` nodes, with placeholder
/// text a render overwrites.
///
/// # Errors
/// Returns an error if the scaffold updates are rejected.
pub fn host_page() -> Result<Document, Error> {
    let mut doc = Document::new();
    let html = doc.create_element("html")?;
    let body = doc.create_element("body")?;
    doc.append_child(html, body, usize::MAX)?;
    for id in [CONTENT_ID, SECONDARY_CONTENT_ID] {
        let node = doc.create_element("div")?;
        doc.set_attribute(node, "id", id)?;
        let placeholder = doc.create_text("placeholder");
        doc.append_child(node, placeholder, usize::MAX)?;
        doc.append_child(body, node, usize::MAX)?;
    }
    Ok(doc)
}

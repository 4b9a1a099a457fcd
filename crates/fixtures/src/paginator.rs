//! The pagination fixture: one parameterized component covering both served
//! variants, which differ only in how boundary links without a destination
//! are rendered.

use anyhow::{Error, anyhow};
use dom::{Document, NodeKey};
use log::info;
use url::Url;

use crate::{CONTENT_ID, LOAD_MARKER, SECONDARY_CONTENT_ID};

/// How a boundary (prev/next) link without a destination is rendered.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoundaryStyle {
    /// Keep the anchor but leave its `href` empty.
    OmitHref,
    /// Drop the `href` entirely and flag the anchor with class `disabled`;
    /// anchors with a destination get class `enabled`.
    StatusClass,
}

/// A navigation link to render for the current page. Generated fresh on each
/// render; never stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkDescriptor {
    /// Target page index, or `None` for a disabled boundary link.
    pub target: Option<u32>,
    /// Visible label of the anchor.
    pub label: String,
    /// Identifier the harness uses to find the anchor (its `title`).
    pub id: String,
}

impl LinkDescriptor {
    /// Whether this link has a destination.
    pub fn enabled(&self) -> bool {
        self.target.is_some()
    }
}

/// Configuration of one pagination fixture.
#[derive(Clone, Debug)]
pub struct PaginatorConfig {
    /// Base file name of the fixture's pages; link targets are
    /// `{base_name}_{page}.html`.
    pub base_name: String,
    /// Number of pages the fixture pretends to have.
    pub max_pages: u32,
    /// Boundary link policy.
    pub boundary: BoundaryStyle,
}

impl PaginatorConfig {
    pub fn new(base_name: impl Into<String>, max_pages: u32, boundary: BoundaryStyle) -> Self {
        Self {
            base_name: base_name.into(),
            max_pages,
            boundary,
        }
    }

    /// Target file name for a page.
    pub fn page_url(&self, page: u32) -> String {
        format!("{}_{page}.html", self.base_name)
    }

    /// The links rendered for `current`, in document order: prev, one per
    /// page, next. Page indices past the boundaries are the caller's problem;
    /// only the two boundary comparisons apply.
    pub fn links(&self, current: u32) -> Vec<LinkDescriptor> {
        let mut links = Vec::with_capacity(self.max_pages as usize + 2);
        links.push(LinkDescriptor {
            target: (current > 1).then(|| current - 1),
            label: String::from("prev"),
            id: String::from("prev"),
        });
        for page in 1..=self.max_pages {
            links.push(LinkDescriptor {
                target: Some(page),
                label: page.to_string(),
                id: format!("page{page}"),
            });
        }
        links.push(LinkDescriptor {
            target: (current < self.max_pages).then(|| current + 1),
            label: String::from("next"),
            id: String::from("next"),
        });
        links
    }

    /// Render the fixture for `current` into the host document: banner,
    /// load-completion marker, then the navigation anchors on the body.
    ///
    /// # Errors
    /// Returns an error if the host page lacks the content nodes or a body.
    pub fn render(&self, doc: &mut Document, current: u32) -> Result<(), Error> {
        let banner = doc
            .element_by_id(CONTENT_ID)
            .ok_or_else(|| anyhow!("host page has no #{CONTENT_ID} element"))?;
        doc.set_text_content(banner, &format!("THIS IS PAGE {current}/{}", self.max_pages))?;

        let marker = doc
            .element_by_id(SECONDARY_CONTENT_ID)
            .ok_or_else(|| anyhow!("host page has no #{SECONDARY_CONTENT_ID} element"))?;
        doc.set_text_content(marker, LOAD_MARKER)?;

        let body = doc
            .first_element_by_tag("body")
            .ok_or_else(|| anyhow!("host page has no <body> element"))?;
        for link in self.links(current) {
            self.append_link(doc, body, &link)?;
        }
        Ok(())
    }

    fn append_link(&self, doc: &mut Document, body: NodeKey, link: &LinkDescriptor) -> Result<(), Error> {
        let anchor = doc.create_element("a")?;
        let label = doc.create_text(&link.label);
        doc.append_child(anchor, label, usize::MAX)?;
        match self.boundary {
            BoundaryStyle::OmitHref => {
                // The trailing space in the title is part of the served pages;
                // the harness matches it byte for byte.
                doc.set_attribute(anchor, "title", &format!("{} ", link.id))?;
                let url = link.target.map(|page| self.page_url(page)).unwrap_or_default();
                doc.set_attribute(anchor, "href", &url)?;
                info!("URL: {url}");
            }
            BoundaryStyle::StatusClass => {
                doc.set_attribute(anchor, "title", &link.id)?;
                if let Some(page) = link.target {
                    let url = self.page_url(page);
                    doc.set_attribute(anchor, "href", &url)?;
                    info!("URL: {url}");
                    doc.set_attribute(anchor, "class", "enabled")?;
                } else {
                    doc.set_attribute(anchor, "class", "disabled")?;
                }
            }
        }
        doc.append_child(body, anchor, usize::MAX)?;
        Ok(())
    }

    /// Resolve the target URL for a page and log the navigation, the way the
    /// served pages announce it before the host performs the actual load.
    pub fn navigate(&self, page: u32) -> String {
        let url = self.page_url(page);
        info!("SET URL: {url}");
        url
    }
}

/// Parse the current page index back out of a fixture page URL, so a hosting
/// page can derive the value it passes to [`PaginatorConfig::render`].
/// Returns `None` when the URL's file name does not match
/// `{base_name}_{page}.html`.
pub fn page_index_from_url(url: &Url, base_name: &str) -> Option<u32> {
    let file = url.path_segments()?.next_back()?;
    file.strip_prefix(base_name)?
        .strip_prefix('_')?
        .strip_suffix(".html")?
        .parse()
        .ok()
}

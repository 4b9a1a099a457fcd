//! End-to-end checks of the pagination fixtures against a host page, covering
//! both boundary policies and the harness-visible strings.

use anyhow::Result;
use dom::{Document, NodeKey};
use fixtures::{LOAD_MARKER, host_page, multi_page_static_links, multi_page_with_state};

fn init_logs() {
    let _unused = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();
}

/// The anchors a render appended to the body, in document order.
fn anchors(doc: &Document) -> Vec<NodeKey> {
    let Some(body) = doc.first_element_by_tag("body") else {
        return Vec::new();
    };
    doc.children(body)
        .iter()
        .copied()
        .filter(|node| doc.tag_name(*node) == Some("a"))
        .collect()
}

fn text_by_id(doc: &Document, id: &str) -> String {
    doc.element_by_id(id)
        .map(|node| doc.text_content(node))
        .unwrap_or_default()
}

#[test]
fn first_page_of_the_plain_fixture() -> Result<()> {
    init_logs();
    let fixture = multi_page_static_links();
    let mut doc = host_page()?;
    fixture.render(&mut doc, 1)?;

    assert_eq!(text_by_id(&doc, "content"), "THIS IS PAGE 1/4");
    assert_eq!(text_by_id(&doc, "content2"), LOAD_MARKER);

    let links = anchors(&doc);
    assert_eq!(links.len(), 6, "prev + 4 pages + next");

    // The boundary prev link keeps an empty href.
    assert_eq!(doc.text_content(links[0]), "prev");
    assert_eq!(doc.attribute(links[0], "href").as_deref(), Some(""));
    assert_eq!(doc.attribute(links[0], "title").as_deref(), Some("prev "));

    for (index, link) in links[1..5].iter().enumerate() {
        let page = index + 1;
        assert_eq!(doc.text_content(*link), page.to_string());
        assert_eq!(
            doc.attribute(*link, "href").as_deref(),
            Some(format!("MultiPageJS_STATIC_LINKS_{page}.html").as_str())
        );
        assert_eq!(
            doc.attribute(*link, "title").as_deref(),
            Some(format!("page{page} ").as_str())
        );
    }

    assert_eq!(doc.text_content(links[5]), "next");
    assert_eq!(
        doc.attribute(links[5], "href").as_deref(),
        Some("MultiPageJS_STATIC_LINKS_2.html")
    );
    Ok(())
}

#[test]
fn last_page_of_the_plain_fixture_disables_next() -> Result<()> {
    init_logs();
    let fixture = multi_page_static_links();
    let mut doc = host_page()?;
    fixture.render(&mut doc, 4)?;

    let links = anchors(&doc);
    assert_eq!(
        doc.attribute(links[0], "href").as_deref(),
        Some("MultiPageJS_STATIC_LINKS_3.html")
    );
    assert_eq!(doc.attribute(links[5], "href").as_deref(), Some(""));
    Ok(())
}

#[test]
fn banner_and_page_links_hold_for_every_page() -> Result<()> {
    init_logs();
    let fixture = multi_page_static_links();
    for current in 1..=4u32 {
        let mut doc = host_page()?;
        fixture.render(&mut doc, current)?;
        assert_eq!(
            text_by_id(&doc, "content"),
            format!("THIS IS PAGE {current}/4")
        );

        // Every page always links to all four pages, current one included.
        let links = anchors(&doc);
        let page_hrefs: Vec<Option<String>> = links[1..5]
            .iter()
            .map(|link| doc.attribute(*link, "href"))
            .collect();
        let expected: Vec<Option<String>> = (1..=4)
            .map(|page| Some(format!("MultiPageJS_STATIC_LINKS_{page}.html")))
            .collect();
        assert_eq!(page_hrefs, expected, "page links for current={current}");
    }
    Ok(())
}

#[test]
fn second_page_of_the_stateful_fixture() -> Result<()> {
    init_logs();
    let fixture = multi_page_with_state();
    let mut doc = host_page()?;
    fixture.render(&mut doc, 2)?;

    assert_eq!(text_by_id(&doc, "content"), "THIS IS PAGE 2/2");
    assert_eq!(text_by_id(&doc, "content2"), LOAD_MARKER);

    let links = anchors(&doc);
    assert_eq!(links.len(), 4, "prev + 2 pages + next");

    assert_eq!(doc.attribute(links[0], "class").as_deref(), Some("enabled"));
    assert_eq!(
        doc.attribute(links[0], "href").as_deref(),
        Some("MultiPageJS_STATIC_LINKS_WITH_STATE_1.html")
    );
    assert_eq!(doc.attribute(links[0], "title").as_deref(), Some("prev"));

    // The boundary next link stays in the DOM, classed but without an href.
    assert_eq!(doc.attribute(links[3], "class").as_deref(), Some("disabled"));
    assert_eq!(doc.attribute(links[3], "href"), None);
    Ok(())
}

#[test]
fn stateful_classes_match_link_targets() -> Result<()> {
    init_logs();
    let fixture = multi_page_with_state();
    for current in 1..=2u32 {
        let mut doc = host_page()?;
        fixture.render(&mut doc, current)?;
        for link in anchors(&doc) {
            let class = doc.attribute(link, "class");
            let href = doc.attribute(link, "href");
            match href {
                Some(_) => assert_eq!(class.as_deref(), Some("enabled")),
                None => assert_eq!(class.as_deref(), Some("disabled")),
            }
        }
    }
    Ok(())
}

#[test]
fn navigation_resolves_the_page_file_name() {
    init_logs();
    let fixture = multi_page_static_links();
    assert_eq!(fixture.navigate(3), "MultiPageJS_STATIC_LINKS_3.html");
}

#[test]
fn renders_are_stateless_across_loads() -> Result<()> {
    init_logs();
    let fixture = multi_page_static_links();
    let mut first = host_page()?;
    fixture.render(&mut first, 2)?;
    let mut second = host_page()?;
    fixture.render(&mut second, 2)?;

    assert_eq!(first.serialize(NodeKey::ROOT), second.serialize(NodeKey::ROOT));
    Ok(())
}

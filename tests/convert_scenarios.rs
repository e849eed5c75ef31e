//! End-to-end conversion scenarios exercised through the public API.
//!
//! Each case feeds exported-note HTML into the converter and checks the
//! emitted block sequence, covering the title skip, stray-text
//! coalescing, list nesting, table elision, and inline image decoding.

use notelift::{Block, Converter};

fn convert_body(html: &str) -> Vec<Block> {
    Converter::new().with_skip_title(false).convert(html).blocks
}

fn kinds(blocks: &[Block]) -> Vec<&'static str> {
    blocks.iter().map(Block::kind).collect()
}

#[test]
fn conversion_is_deterministic() {
    let html = "<div>Title</div><h2>A</h2><ul><li>x</li>stray<li>y</li></ul><table><tbody></tbody></table><p>tail</p>";
    let first = Converter::new().convert(html);
    let second = Converter::new().convert(html);
    assert_eq!(first, second);
}

#[test]
fn first_element_is_dropped_regardless_of_tag() {
    let converted = notelift::convert("<h1>Title</h1><p>Body</p>");
    assert_eq!(kinds(&converted.blocks), vec!["paragraph"]);
    assert_eq!(converted.blocks[0].plain_text(), "Body");

    // Not heading-shaped at all, still treated as the title duplicate.
    let converted = notelift::convert("<p>Groceries</p><p>Body</p>");
    assert_eq!(kinds(&converted.blocks), vec!["paragraph"]);
    assert_eq!(converted.blocks[0].plain_text(), "Body");
}

#[test]
fn line_breaks_merge_fragments_into_one_paragraph() {
    let blocks = convert_body("<div>one<br>two</div>");
    assert_eq!(kinds(&blocks), vec!["paragraph"]);
    assert_eq!(blocks[0].plain_text(), "one two");
}

#[test]
fn list_items_come_out_without_a_wrapper_block() {
    let blocks = convert_body("<ul><li>a</li><li>b</li></ul>");
    assert_eq!(
        kinds(&blocks),
        vec!["bulleted_list_item", "bulleted_list_item"]
    );
    assert_eq!(blocks[0].plain_text(), "a");
    assert_eq!(blocks[1].plain_text(), "b");
}

#[test]
fn ordered_lists_keep_their_numbering_kind() {
    let blocks = convert_body("<ol><li>first</li><li>second</li></ol>");
    assert_eq!(
        kinds(&blocks),
        vec!["numbered_list_item", "numbered_list_item"]
    );
}

#[test]
fn nested_list_attaches_to_the_item_before_it() {
    let blocks = convert_body("<ul><li>a<ul><li>b</li></ul></li></ul>");
    assert_eq!(kinds(&blocks), vec!["bulleted_list_item"]);
    assert_eq!(blocks[0].plain_text(), "a");
    match &blocks[0] {
        Block::BulletedListItem { children, .. } => {
            assert_eq!(kinds(children), vec!["bulleted_list_item"]);
            assert_eq!(children[0].plain_text(), "b");
        }
        other => panic!("expected list item, got {}", other.kind()),
    }
}

#[test]
fn empty_tables_are_elided() {
    assert!(convert_body("<table><tbody></tbody></table>").is_empty());
    assert!(convert_body("<table></table>").is_empty());
}

#[test]
fn tables_keep_cell_order() {
    let blocks = convert_body(
        "<table><tr><th>name</th><th>qty</th></tr><tr><td>apples</td><td>3</td></tr></table>",
    );
    assert_eq!(kinds(&blocks), vec!["table"]);
    match &blocks[0] {
        Block::Table { rows } => {
            assert_eq!(rows[0].cells, vec!["name", "qty"]);
            assert_eq!(rows[1].cells, vec!["apples", "3"]);
        }
        other => panic!("expected table, got {}", other.kind()),
    }
}

#[test]
fn data_uri_images_are_decoded_but_emit_no_block() {
    let converted = Converter::new()
        .with_skip_title(false)
        .convert("<img src=\"data:image/png;base64,AAAA\">");
    assert!(converted.blocks.is_empty());
    assert_eq!(converted.images.len(), 1);
    assert_eq!(converted.images[0].media_type, "png");
    assert!(!converted.images[0].bytes.is_empty());
}

#[test]
fn non_data_uri_images_are_skipped_without_failing() {
    let converted = Converter::new()
        .with_skip_title(false)
        .convert("<img src=\"not-a-data-uri\"><p>after</p>");
    assert!(converted.images.is_empty());
    assert_eq!(kinds(&converted.blocks), vec!["paragraph"]);
}

#[test]
fn known_inline_tags_become_markup() {
    let blocks = convert_body("<p><b>x</b></p>");
    assert_eq!(blocks[0].plain_text(), "**x**");

    let blocks = convert_body("<p><em>x</em></p>");
    assert_eq!(blocks[0].plain_text(), "*x*");

    // Unknown inline tags pass their text through untouched.
    let blocks = convert_body("<p><weird>x</weird></p>");
    assert_eq!(blocks[0].plain_text(), "x");
}

#[test]
fn full_note_export_shape() {
    let html = concat!(
        "<div>Trip planning</div>",
        "<h2>Packing</h2>",
        "<ul><li>socks</li><li>charger</li></ul>",
        "<pre>ssh pi@camper</pre>",
        "<blockquote>leave early</blockquote>",
        "<hr>",
        "<table><tbody><tr><td>day</td><td>stop</td></tr></tbody></table>",
        "<iframe src=\"https://maps.example/route\"></iframe>",
    );
    let converted = notelift::convert(html);
    assert_eq!(
        kinds(&converted.blocks),
        vec![
            "heading_2",
            "bulleted_list_item",
            "bulleted_list_item",
            "code",
            "quote",
            "divider",
            "table",
            "embed",
        ]
    );
    match &converted.blocks[7] {
        Block::Embed { url } => assert_eq!(url, "https://maps.example/route"),
        other => panic!("expected embed, got {}", other.kind()),
    }
}

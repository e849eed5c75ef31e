//! List handling.
//!
//! Items append to the surrounding destination directly; there is no
//! wrapper block for the list itself. Notes exports flatten nesting by
//! placing a sub-list either inside the `li` it belongs to or as a direct
//! sibling of it under the same list. Both shapes hang the sub-items off
//! the most recent item. A sub-list arriving before any item has nowhere
//! to go and is dropped.

use std::rc::Rc;

use markup5ever_rcdom::Node;

use super::handlers::ListKind;
use super::text::{joined_child_text, tag_name};
use super::{Context, dispatch};
use crate::block::Block;

pub(super) fn handle(node: &Rc<Node>, dest: &mut Vec<Block>, ctx: &mut Context, kind: ListKind) {
    // The current item is held back until the next item (or the end of the
    // list) so trailing sub-lists can still reach its children.
    let mut current: Option<Block> = None;

    for child in node.children.borrow().iter() {
        if tag_name(child) == Some("li") {
            // item text never swallows a nested sub-list
            let Some(text) = joined_child_text(child, false) else {
                log::debug!("list item with no text; skipping");
                continue;
            };
            if let Some(done) = current.take() {
                dest.push(done);
            }
            let mut item = kind.item(text);
            if let Some(children) = item.children_mut() {
                for sub in child.children.borrow().iter() {
                    if matches!(tag_name(sub), Some("ul") | Some("ol")) {
                        dispatch(sub, children, ctx);
                    }
                }
            }
            current = Some(item);
        } else {
            match current.as_mut().and_then(Block::children_mut) {
                Some(children) => {
                    // leftover text from stray non-item content is dropped
                    dispatch(child, children, ctx);
                }
                None => {
                    let mut scratch = Vec::new();
                    dispatch(child, &mut scratch, ctx);
                    if !scratch.is_empty() {
                        log::debug!(
                            "dropping {} block(s) preceding the first list item",
                            scratch.len()
                        );
                    }
                }
            }
        }
    }

    if let Some(done) = current {
        dest.push(done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::parse_body;

    fn run_list(html: &str) -> Vec<Block> {
        let (_dom, body) = parse_body(html);
        let children = body.children.borrow();
        let list = children
            .iter()
            .find(|child| matches!(tag_name(child), Some("ul") | Some("ol")))
            .expect("list parsed");
        let kind = match tag_name(list) {
            Some("ol") => ListKind::Numbered,
            _ => ListKind::Bulleted,
        };
        let mut dest = Vec::new();
        let mut ctx = Context::new(false);
        handle(list, &mut dest, &mut ctx, kind);
        dest
    }

    #[test]
    fn items_append_without_a_wrapper_block() {
        let blocks = run_list("<ul><li>a</li><li>b</li></ul>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind(), "bulleted_list_item");
        assert_eq!(blocks[0].plain_text(), "a");
        assert_eq!(blocks[1].plain_text(), "b");
    }

    #[test]
    fn ordered_lists_make_numbered_items() {
        let blocks = run_list("<ol><li>first</li></ol>");
        assert_eq!(blocks[0].kind(), "numbered_list_item");
    }

    #[test]
    fn sub_list_inside_item_nests_under_it() {
        let blocks = run_list("<ul><li>a<ul><li>b</li></ul></li></ul>");
        assert_eq!(blocks.len(), 1, "inner items must not become siblings");
        match &blocks[0] {
            Block::BulletedListItem {
                rich_text,
                children,
            } => {
                assert_eq!(rich_text[0].plain_text, "a");
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].plain_text(), "b");
            }
            other => panic!("expected list item, got {}", other.kind()),
        }
    }

    #[test]
    fn sibling_sub_list_nests_under_preceding_item() {
        // flattened export shape: the sub-list sits next to its item
        let blocks = run_list("<ul><li>a</li><ul><li>b</li></ul><li>c</li></ul>");
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::BulletedListItem { children, .. } => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].plain_text(), "b");
            }
            other => panic!("expected list item, got {}", other.kind()),
        }
        assert_eq!(blocks[1].plain_text(), "c");
    }

    #[test]
    fn sub_list_before_any_item_is_dropped() {
        let blocks = run_list("<ul><ul><li>orphan</li></ul><li>a</li></ul>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "a");
    }

    #[test]
    fn empty_item_emits_nothing_and_keeps_current() {
        let blocks = run_list("<ul><li>a</li><li>  </li><ul><li>b</li></ul></ul>");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::BulletedListItem { children, .. } => {
                assert_eq!(children.len(), 1, "sub-list still attaches to 'a'");
            }
            other => panic!("expected list item, got {}", other.kind()),
        }
    }

    #[test]
    fn stray_text_between_items_is_discarded() {
        let blocks = run_list("<ul><li>a</li>loose<li>b</li></ul>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "a");
        assert_eq!(blocks[1].plain_text(), "b");
    }
}

//! Text extraction over parsed HTML nodes.

use std::rc::Rc;

use markup5ever_rcdom::{Node, NodeData};

use crate::block::markup_inline;

/// Local tag name of an element node, `None` for anything else.
pub(crate) fn tag_name(node: &Rc<Node>) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

/// Value of the named attribute on an element node.
pub(crate) fn attr_value(node: &Rc<Node>, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Flatten a node's visible text, in document order.
///
/// A text leaf returns its raw string form. An element collects its
/// children recursively, trims each surviving fragment, joins them with a
/// single space, and wraps the result with [`markup_inline`] for the
/// element's own tag. Returns `None` when no descendant produced visible
/// text. Never mutates the tree.
pub fn extract_text(node: &Rc<Node>) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        NodeData::Element { name, .. } => {
            let joined = joined_child_text(node, true)?;
            Some(markup_inline(&name.local, &joined))
        }
        _ => None,
    }
}

/// Space-joined text of a node's children. With `include_lists` false,
/// `ul`/`ol` children are left out, which is how list-item text is taken so
/// a nested sub-list is not flattened into its parent item.
pub(crate) fn joined_child_text(node: &Rc<Node>, include_lists: bool) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for child in node.children.borrow().iter() {
        if !include_lists && matches!(tag_name(child), Some("ul") | Some("ol")) {
            continue;
        }
        if let Some(text) = extract_text(child) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

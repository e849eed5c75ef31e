//! Table construction.
//!
//! Tables bypass the pending-text path entirely: the handler walks its own
//! children, collecting rows through transparent `thead`/`tbody`/`tfoot`
//! sections. A table that ends up with no rows is never emitted.

use std::rc::Rc;

use markup5ever_rcdom::Node;

use super::text::{extract_text, tag_name};
use crate::block::{Block, TableRow};

pub(super) fn handle(node: &Rc<Node>, dest: &mut Vec<Block>) {
    log::debug!("building table");
    let mut rows = Vec::new();
    collect_rows(node, &mut rows);
    if rows.is_empty() {
        log::debug!("table has no rows; skipping");
        return;
    }
    dest.push(Block::Table { rows });
}

fn collect_rows(node: &Rc<Node>, rows: &mut Vec<TableRow>) {
    for child in node.children.borrow().iter() {
        match tag_name(child) {
            Some("thead") | Some("tbody") | Some("tfoot") => collect_rows(child, rows),
            Some("tr") => rows.push(build_row(child)),
            _ => {}
        }
    }
}

/// One row from a `tr`: the text of each direct `td`/`th` child in column
/// order, empty cells kept as empty strings.
fn build_row(node: &Rc<Node>) -> TableRow {
    let mut cells = Vec::new();
    for child in node.children.borrow().iter() {
        if matches!(tag_name(child), Some("td") | Some("th")) {
            cells.push(extract_text(child).unwrap_or_default());
        }
    }
    TableRow::new(cells)
}

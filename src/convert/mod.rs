//! HTML to block-tree conversion.
//!
//! # Architecture
//!
//! The pipeline has two stages:
//!
//! 1. **Parse**: html5ever turns the note body (a fragment, no enclosing
//!    `<html>`/`<body>` guaranteed) into an rcdom tree; the walk starts at
//!    the synthesized `body`.
//! 2. **Dispatch**: a depth-first walk over children resolves each element
//!    through the static tag table ([`handlers`]) and appends typed blocks
//!    to an explicit destination threaded through every call. Nothing is
//!    read from shared state; one [`Context`] per document carries the
//!    title-skip flag and the decoded images.
//!
//! Text with no block mapping is not lost: each container buffers leftover
//! fragments and flushes them as a single paragraph after its children are
//! exhausted, so stray inline content coalesces instead of fragmenting
//! into one block per text node.

mod handlers;
mod image;
mod list;
mod table;
mod text;

pub use image::{InlineImage, decode_data_uri};
pub use text::extract_text;

use std::rc::Rc;

use html5ever::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Node, RcDom};

use crate::block::Block;

/// Ordered output of one document conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub blocks: Vec<Block>,
    /// Images decoded out of inline data URIs, in emission order, for an
    /// external upload step. The converter assigns them no identifiers.
    pub images: Vec<InlineImage>,
}

/// Per-document traversal state. Created for one `convert` call and
/// discarded with it, so independent conversions never interfere.
struct Context {
    /// True until the document's first element has been dispatched.
    title_pending: bool,
    images: Vec<InlineImage>,
}

impl Context {
    fn new(skip_title: bool) -> Self {
        Self {
            title_pending: skip_title,
            images: Vec::new(),
        }
    }
}

/// HTML-to-block-tree converter.
///
/// Stateless between calls; all per-document state lives in the call. The
/// first element of a note body duplicates the note's title, so it is
/// dropped by default; [`Converter::with_skip_title`] turns that off.
#[derive(Debug, Clone)]
pub struct Converter {
    skip_title: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self { skip_title: true }
    }
}

impl Converter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skip_title(mut self, skip: bool) -> Self {
        self.skip_title = skip;
        self
    }

    /// Convert one note body into its ordered block sequence.
    ///
    /// Infallible by design: malformed markup degrades to best-effort
    /// output (unmapped content becomes a paragraph, bad images are
    /// skipped with a warning) rather than erroring. Converting the same
    /// input twice yields identical output.
    pub fn convert(&self, html: &str) -> Conversion {
        log::debug!("BEGIN parsing");
        // the dom owns the tree; it must outlive the walk
        let (_dom, body) = parse_body(html);
        let mut ctx = Context::new(self.skip_title);
        let mut blocks = Vec::new();
        process_children(&body, &mut blocks, &mut ctx);
        log::debug!("END parsing; {} top-level block(s)", blocks.len());
        Conversion {
            blocks,
            images: ctx.images,
        }
    }
}

/// Parse a body fragment and return the parsed document together with the
/// `body` element of the synthesized tree. The caller must hold the
/// `RcDom` for as long as it walks the tree: rcdom tears a dropped
/// document down iteratively and empties the child list of every node it
/// reaches, including nodes still referenced elsewhere. html5ever always
/// completes the tree, so the fallback to the document node is for safety
/// only.
pub(crate) fn parse_body(html: &str) -> (RcDom, Rc<Node>) {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = html5ever::parse_document(RcDom::default(), opts).one(html);
    let body = find_body(&dom.document).unwrap_or_else(|| Rc::clone(&dom.document));
    (dom, body)
}

fn find_body(document: &Rc<Node>) -> Option<Rc<Node>> {
    for child in document.children.borrow().iter() {
        if text::tag_name(child) == Some("html") {
            for grandchild in child.children.borrow().iter() {
                if text::tag_name(grandchild) == Some("body") {
                    return Some(Rc::clone(grandchild));
                }
            }
        }
    }
    None
}

/// Walk `node`'s children in document order, appending emitted blocks to
/// `dest` and flushing accumulated leftover text as one trailing
/// paragraph. Fragments are trimmed on append and joined with a single
/// space.
fn process_children(node: &Rc<Node>, dest: &mut Vec<Block>, ctx: &mut Context) {
    let mut pending: Vec<String> = Vec::new();
    for child in node.children.borrow().iter() {
        if let Some(leftover) = dispatch(child, dest, ctx) {
            let trimmed = leftover.trim();
            if !trimmed.is_empty() {
                log::debug!("leftover text ({} chars)", trimmed.chars().count());
                pending.push(trimmed.to_string());
            }
        }
    }
    if !pending.is_empty() {
        log::debug!("flushing {} pending fragment(s)", pending.len());
        dest.push(Block::paragraph(pending.join(" ")));
    }
}

/// Route one node. Returns `None` when the node emitted into `dest` (or
/// was deliberately suppressed), or the node's leftover text when it has
/// no handler.
fn dispatch(node: &Rc<Node>, dest: &mut Vec<Block>, ctx: &mut Context) -> Option<String> {
    let Some(tag) = text::tag_name(node) else {
        // text leaves surface as leftover prose; comments and the like
        // extract to nothing
        return text::extract_text(node);
    };

    if ctx.title_pending {
        // the first element repeats the note title, whatever its tag
        ctx.title_pending = false;
        log::debug!("skipping first element <{}>", tag);
        return None;
    }

    match handlers::for_tag(tag) {
        Some(handler) => {
            log::debug!("processing element <{}>", tag);
            handlers::run(handler, node, dest, ctx);
            None
        }
        None => text::extract_text(node),
    }
}

//! The supported-tag table.
//!
//! Dispatch is a static lookup from tag name to a handler variant, so the
//! whole supported set is enumerable and covered by tests. Tags absent
//! from the table fall back to leftover-text extraction in the caller.

use std::rc::Rc;

use markup5ever_rcdom::Node;

use super::{Context, image, list, table, text};
use crate::block::{Block, HeadingLevel};

/// Item kind produced by a list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    pub(crate) fn item(self, text: String) -> Block {
        match self {
            ListKind::Bulleted => Block::bulleted_item(text),
            ListKind::Numbered => Block::numbered_item(text),
        }
    }
}

/// Behavior bound to one supported tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagHandler {
    /// Produces nothing, not even leftover text (`br`, `meta`, `head`).
    Ignore,
    /// Children are processed into the same destination.
    Container,
    Heading(HeadingLevel),
    Paragraph,
    List(ListKind),
    /// Plain code block, language unset (`tt`, `pre`, `script`).
    Code,
    Quote,
    Divider,
    /// `iframe` with a `src` attribute.
    Embed,
    Table,
    /// Row machinery; rows are built by the table walk, so these are inert
    /// when reached through ordinary dispatch.
    TableInternal,
    /// `img` carrying an inline data URI.
    Image,
}

pub(crate) static TAG_HANDLERS: phf::Map<&'static str, TagHandler> = phf::phf_map! {
    "br" => TagHandler::Ignore,
    "meta" => TagHandler::Ignore,
    "head" => TagHandler::Ignore,
    "html" => TagHandler::Container,
    "body" => TagHandler::Container,
    "div" => TagHandler::Container,
    "object" => TagHandler::Container,
    "h1" => TagHandler::Heading(HeadingLevel::H1),
    "h2" => TagHandler::Heading(HeadingLevel::H2),
    "h3" => TagHandler::Heading(HeadingLevel::H3),
    "p" => TagHandler::Paragraph,
    "ul" => TagHandler::List(ListKind::Bulleted),
    "ol" => TagHandler::List(ListKind::Numbered),
    "tt" => TagHandler::Code,
    "pre" => TagHandler::Code,
    "script" => TagHandler::Code,
    "blockquote" => TagHandler::Quote,
    "hr" => TagHandler::Divider,
    "iframe" => TagHandler::Embed,
    "table" => TagHandler::Table,
    "thead" => TagHandler::TableInternal,
    "tbody" => TagHandler::TableInternal,
    "tfoot" => TagHandler::TableInternal,
    "tr" => TagHandler::TableInternal,
    "th" => TagHandler::TableInternal,
    "td" => TagHandler::TableInternal,
    "img" => TagHandler::Image,
};

pub(crate) fn for_tag(tag: &str) -> Option<TagHandler> {
    TAG_HANDLERS.get(tag).copied()
}

/// Run one handler against its element. Blocks go to `dest`; decoded
/// images go to the context.
pub(crate) fn run(handler: TagHandler, node: &Rc<Node>, dest: &mut Vec<Block>, ctx: &mut Context) {
    match handler {
        TagHandler::Ignore => {}
        TagHandler::Container => super::process_children(node, dest, ctx),
        TagHandler::Heading(level) => {
            if let Some(text) = text::extract_text(node) {
                dest.push(Block::heading(level, text));
            }
        }
        TagHandler::Paragraph => {
            if let Some(text) = text::extract_text(node) {
                dest.push(Block::paragraph(text));
            }
        }
        TagHandler::List(kind) => list::handle(node, dest, ctx, kind),
        TagHandler::Code => {
            if let Some(text) = text::extract_text(node) {
                dest.push(Block::code(text, None));
            }
        }
        TagHandler::Quote => {
            if let Some(text) = text::extract_text(node) {
                dest.push(Block::quote(text));
            }
        }
        TagHandler::Divider => dest.push(Block::Divider),
        TagHandler::Embed => match text::attr_value(node, "src") {
            Some(src) => dest.push(Block::embed(src)),
            None => log::warn!("iframe without src attribute"),
        },
        TagHandler::Table => table::handle(node, dest),
        // row parts only mean something inside a table walk
        TagHandler::TableInternal => {}
        TagHandler::Image => image::handle(node, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_tag_set_is_exactly_the_documented_one() {
        let mut tags: Vec<&str> = TAG_HANDLERS.keys().copied().collect();
        tags.sort_unstable();
        assert_eq!(
            tags,
            vec![
                "blockquote",
                "body",
                "br",
                "div",
                "h1",
                "h2",
                "h3",
                "head",
                "hr",
                "html",
                "iframe",
                "img",
                "meta",
                "object",
                "ol",
                "p",
                "pre",
                "script",
                "table",
                "tbody",
                "td",
                "tfoot",
                "th",
                "thead",
                "tr",
                "tt",
                "ul",
            ]
        );
    }

    #[test]
    fn lookup_resolves_levels_and_kinds() {
        assert_eq!(for_tag("h2"), Some(TagHandler::Heading(HeadingLevel::H2)));
        assert_eq!(for_tag("ol"), Some(TagHandler::List(ListKind::Numbered)));
        assert_eq!(for_tag("pre"), Some(TagHandler::Code));
        assert_eq!(for_tag("span"), None);
        assert_eq!(for_tag("H1"), None, "lookup is lowercase only");
    }
}

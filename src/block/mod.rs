//! Content-block vocabulary for converted pages.
//!
//! A page body is an ordered sequence of [`Block`] values. The serialized
//! shape follows block-based document APIs: a `type` tag plus only the
//! fields that kind carries. Table structure is enforced by type: a table
//! holds [`TableRow`]s and a row holds plain text cells, never blocks.

use serde::{Deserialize, Serialize};

/// Inline style flags for one rich text run.
///
/// A style applies to the whole run; runs never nest. Link targets live on
/// [`RichText::href`], not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
}

impl Annotations {
    fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.strikethrough)
    }
}

/// One inline-styled text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Annotations::is_plain")]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichText {
    /// An unstyled run. Inline styling from the source markup is carried
    /// textually (see [`markup_inline`]), so this is what the converter
    /// emits everywhere.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            annotations: Annotations::default(),
            href: None,
        }
    }
}

/// One row of a table block. Cells are plain text in column order; an empty
/// cell is an empty string so column positions survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// Heading depth. Only three levels exist in the output vocabulary; deeper
/// source headings are unmapped tags and fall back to leftover text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

/// One node of the output content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    // snake_case would not put an underscore before the digit
    #[serde(rename = "heading_1")]
    Heading1 {
        rich_text: Vec<RichText>,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        rich_text: Vec<RichText>,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        rich_text: Vec<RichText>,
    },
    Paragraph {
        rich_text: Vec<RichText>,
    },
    BulletedListItem {
        rich_text: Vec<RichText>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Block>,
    },
    NumberedListItem {
        rich_text: Vec<RichText>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Block>,
    },
    Code {
        rich_text: Vec<RichText>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Quote {
        rich_text: Vec<RichText>,
    },
    Divider,
    Table {
        rows: Vec<TableRow>,
    },
    Embed {
        url: String,
    },
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        let rich_text = vec![RichText::plain(text)];
        match level {
            HeadingLevel::H1 => Block::Heading1 { rich_text },
            HeadingLevel::H2 => Block::Heading2 { rich_text },
            HeadingLevel::H3 => Block::Heading3 { rich_text },
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            rich_text: vec![RichText::plain(text)],
        }
    }

    pub fn bulleted_item(text: impl Into<String>) -> Self {
        Block::BulletedListItem {
            rich_text: vec![RichText::plain(text)],
            children: Vec::new(),
        }
    }

    pub fn numbered_item(text: impl Into<String>) -> Self {
        Block::NumberedListItem {
            rich_text: vec![RichText::plain(text)],
            children: Vec::new(),
        }
    }

    pub fn code(text: impl Into<String>, language: Option<&str>) -> Self {
        Block::Code {
            rich_text: vec![RichText::plain(text)],
            language: language.map(str::to_string),
        }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Block::Quote {
            rich_text: vec![RichText::plain(text)],
        }
    }

    pub fn embed(url: impl Into<String>) -> Self {
        Block::Embed { url: url.into() }
    }

    /// The serialized `type` tag for this block.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading1 { .. } => "heading_1",
            Block::Heading2 { .. } => "heading_2",
            Block::Heading3 { .. } => "heading_3",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletedListItem { .. } => "bulleted_list_item",
            Block::NumberedListItem { .. } => "numbered_list_item",
            Block::Code { .. } => "code",
            Block::Quote { .. } => "quote",
            Block::Divider => "divider",
            Block::Table { .. } => "table",
            Block::Embed { .. } => "embed",
        }
    }

    /// Mutable child list for block kinds that nest (list items). `None`
    /// for everything else; table rows are not blocks and never nest.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            Block::BulletedListItem { children, .. }
            | Block::NumberedListItem { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Concatenated plain text of this block's runs. Empty for kinds that
    /// carry no text.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading1 { rich_text }
            | Block::Heading2 { rich_text }
            | Block::Heading3 { rich_text }
            | Block::Paragraph { rich_text }
            | Block::BulletedListItem { rich_text, .. }
            | Block::NumberedListItem { rich_text, .. }
            | Block::Code { rich_text, .. }
            | Block::Quote { rich_text } => rich_text
                .iter()
                .map(|run| run.plain_text.as_str())
                .collect::<Vec<_>>()
                .join(""),
            Block::Divider | Block::Table { .. } | Block::Embed { .. } => String::new(),
        }
    }
}

/// Wrap `text` with lightweight textual markup for known inline tags.
///
/// Bold for `b`/`strong`, italic for `i`/`em`, strikethrough for `strike`,
/// angle brackets for `a` (the link target itself is dropped). Unknown tags
/// pass the text through unchanged. Total over any (tag, text) pair.
pub fn markup_inline(tag: &str, text: &str) -> String {
    match tag {
        "b" | "strong" => format!("**{}**", text),
        "i" | "em" => format!("*{}*", text),
        "strike" => format!("~~{}~~", text),
        "a" => format!("<{}>", text),
        _ => text.to_string(),
    }
}

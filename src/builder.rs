//! Page assembly.
//!
//! One note becomes one page: title from the metadata, converted body
//! blocks, then appendices behind dividers (attachment descriptors as
//! YAML code blocks, optionally the note metadata and the raw HTML).
//! Decoded inline images are staged to temporary files; uploading them is
//! a later step the backing stores do not offer yet.

use std::io::Write as _;

use anyhow::{Context as _, Result};

use crate::block::Block;
use crate::convert::{Converter, InlineImage};
use crate::note::{AttachmentMeta, Note};
use crate::store::{PageRef, PageStore};

/// Builds one page per note on top of a [`PageStore`].
pub struct PageBuilder<S: PageStore> {
    store: S,
    parent: String,
    skip_title: bool,
    include_meta: bool,
    include_html: bool,
}

impl<S: PageStore> PageBuilder<S> {
    pub fn new(store: S, parent: impl Into<String>) -> Self {
        Self {
            store,
            parent: parent.into(),
            skip_title: true,
            include_meta: true,
            include_html: false,
        }
    }

    /// Treat the note's first element as a title duplicate and drop it.
    #[must_use]
    pub fn with_skip_title(mut self, skip: bool) -> Self {
        self.skip_title = skip;
        self
    }

    /// Append the note metadata as a YAML code block.
    #[must_use]
    pub fn with_include_meta(mut self, include: bool) -> Self {
        self.include_meta = include;
        self
    }

    /// Append the raw exported HTML as a code block.
    #[must_use]
    pub fn with_include_html(mut self, include: bool) -> Self {
        self.include_html = include;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Convert and persist one note, returning where the page lives.
    pub fn build(&mut self, note: &Note) -> Result<PageRef> {
        log::debug!("parsing note - {} :: {}", note.meta.name, note.meta.id);

        let conversion = Converter::new()
            .with_skip_title(self.skip_title)
            .convert(&note.body);

        let page = self
            .store
            .create_page(&self.parent, &note.meta.name)
            .with_context(|| format!("creating page for '{}'", note.meta.name))?;
        self.store
            .append_blocks(&page, &conversion.blocks)
            .with_context(|| format!("appending body of '{}'", note.meta.name))?;

        stage_images(&conversion.images)?;

        if !note.attachments.is_empty() {
            self.import_attachments(&page, &note.attachments)?;
        }

        if self.include_meta || self.include_html {
            self.store.append_blocks(&page, &[Block::Divider])?;
        }

        if self.include_meta {
            log::debug!("adding metadata to page");
            let meta_text = serde_yaml::to_string(&note.meta)?;
            self.append_code(&page, meta_text.trim(), Some("yaml"))?;
        }

        if self.include_html {
            log::debug!("appending raw HTML");
            self.append_code(&page, &note.body, Some("html"))?;
        }

        log::debug!("finished construction - {}", note.meta.id);
        Ok(page)
    }

    /// Attachment binaries cannot be pulled through the exporter, so their
    /// descriptors go on the page to track them down by hand.
    fn import_attachments(&mut self, page: &PageRef, attachments: &[AttachmentMeta]) -> Result<()> {
        log::debug!("processing attachments");
        self.store.append_blocks(page, &[Block::Divider])?;
        for attachment in attachments {
            log::debug!("attachment[{}] => {}", attachment.id, attachment.name);
            let text = serde_yaml::to_string(attachment)?;
            self.append_code(page, text.trim(), Some("yaml"))?;
        }
        Ok(())
    }

    fn append_code(&mut self, page: &PageRef, text: &str, language: Option<&str>) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.store
            .append_blocks(page, &[Block::code(text, language)])
    }
}

/// Write decoded inline images to temporary files for upload.
// TODO upload staged images once a store grows an attachment surface
fn stage_images(images: &[InlineImage]) -> Result<()> {
    for image in images {
        let suffix = format!(".{}", image.media_type);
        let mut file = tempfile::Builder::new()
            .suffix(&suffix)
            .tempfile()
            .context("staging inline image")?;
        file.write_all(&image.bytes)
            .context("writing inline image")?;
        log::debug!(
            "staged {} byte {} image at {}",
            image.bytes.len(),
            image.media_type,
            file.path().display()
        );
    }
    Ok(())
}

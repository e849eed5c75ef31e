//! Page persistence.
//!
//! A [`PageStore`] turns a title plus an ordered block sequence into a
//! reachable page, preserving block order exactly. Two implementations
//! ship: [`JsonPageStore`] materializes one pretty-printed JSON document
//! per page under an output directory, and [`MemoryStore`] keeps pages in
//! memory for tests and dry runs.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::block::Block;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write page: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize page: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unknown page id: {0}")]
    UnknownPage(String),
}

/// Reachable location of a created page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub id: String,
    pub url: String,
}

/// Block-persistence collaborator.
///
/// `create_page` allocates an empty page under `parent` and returns where
/// it lives; `append_blocks` extends it in emission order. Failures
/// propagate to the caller unchanged; nothing here retries.
pub trait PageStore {
    fn create_page(&mut self, parent: &str, title: &str) -> anyhow::Result<PageRef>;
    fn append_blocks(&mut self, page: &PageRef, blocks: &[Block]) -> anyhow::Result<()>;
}

#[derive(Debug, Serialize)]
struct PageDocument {
    title: String,
    blocks: Vec<Block>,
}

/// Writes each page as `<output_dir>/<sanitized title>.json`.
#[derive(Debug)]
pub struct JsonPageStore {
    output_dir: PathBuf,
    open_pages: HashMap<String, PageDocument>,
}

impl JsonPageStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            open_pages: HashMap::new(),
        }
    }

    fn page_path(&self, id: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", id))
    }

    /// Derive a free page id from the title. Titles repeat across notes,
    /// so collisions get a numeric suffix.
    fn allocate_id(&self, title: &str) -> String {
        let base = sanitize_filename::sanitize(title.trim());
        let base = if base.is_empty() {
            "untitled".to_string()
        } else {
            base
        };
        let mut candidate = base.clone();
        let mut counter = 2;
        while self.open_pages.contains_key(&candidate) || self.page_path(&candidate).exists() {
            candidate = format!("{}-{}", base, counter);
            counter += 1;
        }
        candidate
    }

    fn flush(&self, id: &str) -> Result<(), StoreError> {
        let document = self
            .open_pages
            .get(id)
            .ok_or_else(|| StoreError::UnknownPage(id.to_string()))?;
        let json = serde_json::to_string_pretty(document)?;
        fs::create_dir_all(&self.output_dir)?;
        fs::write(self.page_path(id), json)?;
        Ok(())
    }
}

impl PageStore for JsonPageStore {
    fn create_page(&mut self, _parent: &str, title: &str) -> anyhow::Result<PageRef> {
        let id = self.allocate_id(title);
        log::debug!("creating page file - {}", id);
        self.open_pages.insert(
            id.clone(),
            PageDocument {
                title: title.to_string(),
                blocks: Vec::new(),
            },
        );
        self.flush(&id)?;
        let url = self.page_path(&id).display().to_string();
        Ok(PageRef { id, url })
    }

    fn append_blocks(&mut self, page: &PageRef, blocks: &[Block]) -> anyhow::Result<()> {
        let document = self
            .open_pages
            .get_mut(&page.id)
            .ok_or_else(|| StoreError::UnknownPage(page.id.clone()))?;
        document.blocks.extend_from_slice(blocks);
        log::debug!(
            "page {} now holds {} block(s)",
            page.id,
            document.blocks.len()
        );
        self.flush(&page.id)?;
        Ok(())
    }
}

/// One page recorded by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPage {
    pub parent: String,
    pub title: String,
    pub blocks: Vec<Block>,
}

/// In-memory store for tests and `--dry-run`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: Vec<MemoryPage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[MemoryPage] {
        &self.pages
    }
}

impl PageStore for MemoryStore {
    fn create_page(&mut self, parent: &str, title: &str) -> anyhow::Result<PageRef> {
        let id = self.pages.len().to_string();
        self.pages.push(MemoryPage {
            parent: parent.to_string(),
            title: title.to_string(),
            blocks: Vec::new(),
        });
        Ok(PageRef {
            url: format!("memory://{}/{}", parent, id),
            id,
        })
    }

    fn append_blocks(&mut self, page: &PageRef, blocks: &[Block]) -> anyhow::Result<()> {
        let index: usize = page
            .id
            .parse()
            .map_err(|_| StoreError::UnknownPage(page.id.clone()))?;
        let recorded = self
            .pages
            .get_mut(index)
            .ok_or_else(|| StoreError::UnknownPage(page.id.clone()))?;
        recorded.blocks.extend_from_slice(blocks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_preserves_append_order() {
        let mut store = MemoryStore::new();
        let page = store.create_page("archive", "Odds and ends").unwrap();
        store
            .append_blocks(&page, &[Block::paragraph("one"), Block::Divider])
            .unwrap();
        store
            .append_blocks(&page, &[Block::paragraph("two")])
            .unwrap();

        let pages = store.pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Odds and ends");
        assert_eq!(
            pages[0]
                .blocks
                .iter()
                .map(Block::kind)
                .collect::<Vec<_>>(),
            vec!["paragraph", "divider", "paragraph"]
        );
    }

    #[test]
    fn memory_store_rejects_unknown_pages() {
        let mut store = MemoryStore::new();
        let bogus = PageRef {
            id: "7".to_string(),
            url: "memory://x/7".to_string(),
        };
        assert!(store.append_blocks(&bogus, &[Block::Divider]).is_err());
    }
}

pub mod apple;
pub mod block;
pub mod builder;
pub mod config;
pub mod convert;
pub mod note;
pub mod store;

pub use apple::AppleNotes;
pub use block::{Annotations, Block, HeadingLevel, RichText, TableRow};
pub use builder::PageBuilder;
pub use config::AppConfig;
pub use convert::{Conversion, Converter, InlineImage};
pub use note::{AttachmentMeta, Note, NoteMeta, NoteSource};
pub use store::{JsonPageStore, MemoryStore, PageRef, PageStore};

/// Convert exported note HTML to blocks with the default settings.
pub fn convert(html: &str) -> Conversion {
    Converter::new().convert(html)
}

//! Note metadata and the transport export envelope.
//!
//! A transport hands over one text blob per note: a YAML head (`meta:`
//! mapping plus an `attachments:` list) separated from the raw HTML body
//! by a `---` line. [`Note::parse_export`] undoes that framing. Dates stay
//! opaque strings; the desktop exporter emits locale-formatted values that
//! are display-only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to parse a transport export blob.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("export envelope has no '---' separator")]
    MissingSeparator,
    #[error("export metadata is not valid YAML: {0}")]
    Meta(#[from] serde_yaml::Error),
}

/// Metadata of one note as reported by the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub creation_date: String,
    #[serde(default)]
    pub modification_date: String,
    /// Password-protected notes export no body and are skipped upstream.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub shared: bool,
}

/// Descriptor of one attachment. Binary content is not part of the
/// envelope; `reference` identifies it for a later retrieval step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub creation_date: String,
    #[serde(default)]
    pub modification_date: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// One retrieved note: metadata, attachment descriptors, HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub meta: NoteMeta,
    pub attachments: Vec<AttachmentMeta>,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    meta: NoteMeta,
    // a bare `attachments:` key deserializes as null, not an empty list
    #[serde(default)]
    attachments: Option<Vec<AttachmentMeta>>,
}

impl Note {
    /// Parse one export blob: YAML head, first `---`, body. The body is
    /// trimmed; later `---` occurrences belong to the body.
    pub fn parse_export(text: &str) -> Result<Self, EnvelopeError> {
        let (head, body) = text
            .split_once("---")
            .ok_or(EnvelopeError::MissingSeparator)?;
        // the exporter escapes apostrophes shell-style; YAML doubles them
        let head = head.replace("'\\''", "''");
        let envelope: Envelope = serde_yaml::from_str(&head)?;
        Ok(Note {
            meta: envelope.meta,
            attachments: envelope.attachments.unwrap_or_default(),
            body: body.trim().to_string(),
        })
    }
}

/// Where notes come from.
///
/// `fetch` returning `Ok(None)` means the note exported empty or
/// unreadable; the driver logs and moves on. Hard transport failures are
/// errors.
pub trait NoteSource {
    fn note_ids(&self) -> anyhow::Result<Vec<String>>;
    fn fetch(&self, note_id: &str) -> anyhow::Result<Option<Note>>;
}

//! Apple Notes transport.
//!
//! Notes has no bulk export interface, so retrieval drives the Notes app
//! through AppleScript: one script lists every note's CoreData URL, then
//! one script per note walks the account (there is no lookup by id) and
//! emits the export envelope parsed by [`Note::parse_export`]. Script
//! construction and output interpretation are pure functions; only the
//! `osascript` invocation touches the system.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::note::{Note, NoteSource};

static NOTE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"x-coredata://.*/p[0-9]+").expect("note id pattern is valid"));

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to run osascript: {0}")]
    Launch(#[from] std::io::Error),
    #[error("osascript exited with {status}: {stderr}")]
    Script {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Notes of the default account of the local Notes app.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleNotes;

impl AppleNotes {
    pub fn new() -> Self {
        Self
    }

    fn run_script(&self, script: &str) -> Result<Option<String>, ExportError> {
        log::debug!("running {} byte script", script.len());
        let output = Command::new("osascript").arg("-e").arg(script).output()?;
        if !output.status.success() {
            return Err(ExportError::Script {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(scalar_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl NoteSource for AppleNotes {
    fn note_ids(&self) -> anyhow::Result<Vec<String>> {
        let raw = self
            .run_script(&tell_notes("return notes of default account"))?
            .unwrap_or_default();
        let ids = parse_note_links(&raw);
        log::debug!("listed {} note(s)", ids.len());
        Ok(ids)
    }

    fn fetch(&self, note_id: &str) -> anyhow::Result<Option<Note>> {
        log::debug!("loading note: {}", note_id);
        let Some(text) = self.run_script(&export_script(note_id))? else {
            return Ok(None);
        };
        log::debug!("parsing {} bytes from export", text.len());
        let note = Note::parse_export(&text)?;
        log::debug!("loaded note - {}", note.meta.name);
        Ok(Some(note))
    }
}

/// Interpret raw `osascript` stdout the way the exporter means it: a lone
/// `null` or nothing at all is no value.
fn scalar_output(raw: &str) -> Option<String> {
    let out = raw.trim_end_matches(['\n', '\r']);
    if out.is_empty() || out == "null" {
        return None;
    }
    Some(out.to_string())
}

/// The account's `notes` property serializes as a comma-separated list of
/// CoreData URLs with household noise around them; keep the URL part.
/// Entries that do not look like CoreData URLs pass through untouched.
fn parse_note_links(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(|link| match NOTE_ID_RE.find(link) {
            Some(found) => found.as_str().to_string(),
            None => link.to_string(),
        })
        .collect()
}

fn tell_notes(script: &str) -> String {
    format!("tell application \"Notes\"\n{}\nend tell", script)
}

/// Per-note export script. Emits the YAML metadata head, a `---` line and
/// the HTML body; `quoted form of` keeps scalar values one-line.
fn export_script(note_id: &str) -> String {
    tell_notes(&format!(
        r#"repeat with theNote in notes of default account
  set noteID to id of theNote as string
  if noteID is equal to "{note_id}" then
    set folderName to ""
    set theContainer to container of theNote
    if theContainer is not missing value then
      set folderName to "/" & (name of theContainer)
    end if
    set noteMeta to "meta:"
    set noteMeta to noteMeta & "\n  id: " & quoted form of (id of theNote as string)
    set noteMeta to noteMeta & "\n  name: " & quoted form of (name of theNote as string)
    set noteMeta to noteMeta & "\n  folder: " & quoted form of folderName
    set noteMeta to noteMeta & "\n  creation_date: " & quoted form of (creation date of theNote as string)
    set noteMeta to noteMeta & "\n  modification_date: " & quoted form of (modification date of theNote as string)
    set noteMeta to noteMeta & "\n  locked: " & (password protected of theNote as boolean)
    set noteMeta to noteMeta & "\n  shared: " & (shared of theNote as boolean)
    set noteMeta to noteMeta & "\nattachments:"
    repeat with theAttachment in attachments of theNote
      set noteMeta to noteMeta & "\n  - id: " & (id of theAttachment as string)
      set noteMeta to noteMeta & "\n    name: " & quoted form of (name of theAttachment as string)
      set noteMeta to noteMeta & "\n    ref: " & quoted form of (content identifier of theAttachment as string)
      set noteMeta to noteMeta & "\n    creation_date: " & quoted form of (creation date of theAttachment as string)
      set noteMeta to noteMeta & "\n    modification_date: " & quoted form of (modification date of theAttachment as string)
      set noteMeta to noteMeta & "\n    url: " & (url of theAttachment)
    end repeat
    return noteMeta & "\n---\n" & (body of theNote as string)
  end if
end repeat"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_links_reduce_to_coredata_urls() {
        let raw = "note id x-coredata://AAA-BBB/ICNote/p42, note id x-coredata://AAA-BBB/ICNote/p7";
        assert_eq!(
            parse_note_links(raw),
            vec![
                "x-coredata://AAA-BBB/ICNote/p42",
                "x-coredata://AAA-BBB/ICNote/p7",
            ]
        );
    }

    #[test]
    fn unrecognized_links_pass_through() {
        assert_eq!(parse_note_links("mystery-handle"), vec!["mystery-handle"]);
        assert!(parse_note_links("").is_empty());
        assert!(parse_note_links(" , ,").is_empty());
    }

    #[test]
    fn scalar_output_maps_empty_and_null_to_none() {
        assert_eq!(scalar_output(""), None);
        assert_eq!(scalar_output("\n"), None);
        assert_eq!(scalar_output("null\n"), None);
        assert_eq!(scalar_output("meta:\nstuff\n").as_deref(), Some("meta:\nstuff"));
    }

    #[test]
    fn export_script_targets_the_requested_note() {
        let script = export_script("x-coredata://AAA/ICNote/p3");
        assert!(script.starts_with("tell application \"Notes\""));
        assert!(script.contains("if noteID is equal to \"x-coredata://AAA/ICNote/p3\" then"));
        assert!(script.contains(r#"return noteMeta & "\n---\n" & (body of theNote as string)"#));
        assert!(script.ends_with("end tell"));
    }
}

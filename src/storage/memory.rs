//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::notes::Note;

use super::CreateNoteValues;
use super::Error;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;

/// Everything guarded by the storage lock
///
/// The ID counter lives next to the rows, so assigning an ID and inserting the note is a single
/// step
#[derive(Debug)]
struct Table {
    /// ID for the next note, only ever goes up
    next_id: u64,

    /// All notes, ordered by ID
    notes: BTreeMap<u64, Note>,
}

impl Table {
    fn new() -> Self {
        Self {
            next_id: 1,
            notes: BTreeMap::new(),
        }
    }

    fn find_owned_mut(&mut self, owner_id: &str, id: u64) -> Result<&mut Note> {
        self.notes
            .get_mut(&id)
            .filter(|note| note.is_owned_by(owner_id))
            .ok_or(Error::NotFound)
    }
}

/// An in-memory storage
///
/// Cloning is cheap, all clones share the same notes
#[derive(Clone, Debug)]
pub struct Memory {
    /// All notes in storage
    table: Arc<Mutex<Table>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table::new())),
        }
    }
}

impl Storage for Memory {
    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        ensure_not_empty("title", Some(values.title))?;
        ensure_not_empty("content", Some(values.content))?;

        let mut table = self.table.lock().await;

        let now = Utc::now();
        let note = Note {
            id: table.next_id,
            title: values.title.to_string(),
            content: values.content.to_string(),
            owner_id: values.owner_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        table.next_id += 1;
        table.notes.insert(note.id, note.clone());

        tracing::debug!(r#"Created note {} for "{}""#, note.id, note.owner_id);

        Ok(note)
    }

    async fn find_all_notes_by_owner(&self, owner_id: &str) -> Vec<Note> {
        self.table
            .lock()
            .await
            .notes
            .values()
            .filter(|note| note.is_owned_by(owner_id))
            .cloned()
            .collect()
    }

    async fn find_single_note(&self, owner_id: &str, id: u64) -> Result<Note> {
        self.table
            .lock()
            .await
            .notes
            .get(&id)
            .filter(|note| note.is_owned_by(owner_id))
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn update_note(
        &self,
        owner_id: &str,
        id: u64,
        values: &UpdateNoteValues<'_>,
    ) -> Result<Note> {
        ensure_not_empty("title", values.title)?;
        ensure_not_empty("content", values.content)?;

        let mut table = self.table.lock().await;
        let note = table.find_owned_mut(owner_id, id)?;

        if let Some(title) = values.title {
            note.title = title.to_string();
        }

        if let Some(content) = values.content {
            note.content = content.to_string();
        }

        note.touch(Utc::now());

        tracing::debug!(r#"Updated note {} of "{}""#, note.id, note.owner_id);

        Ok(note.clone())
    }

    async fn delete_note(&self, owner_id: &str, id: u64) -> Result<()> {
        let mut table = self.table.lock().await;

        table.find_owned_mut(owner_id, id)?;
        table.notes.remove(&id);

        tracing::debug!(r#"Deleted note {id} of "{owner_id}""#);

        Ok(())
    }

    async fn count_notes(&self) -> usize {
        self.table.lock().await.notes.len()
    }
}

fn ensure_not_empty(field: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) if value.is_empty() => Err(Error::InvalidNote(field)),
        _ => Ok(()),
    }
}

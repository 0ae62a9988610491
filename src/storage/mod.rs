//! All things related to the storage of notes

use thiserror::Error;

use crate::notes::Note;

pub use memory::Memory;

mod memory;

/// Setup the storage
///
/// Starts empty, lives as long as the returned value (and its clones) do
pub fn setup() -> Memory {
    Memory::new()
}

/// Storage errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No note with the ID for the owner
    ///
    /// Notes of other owners are reported the same way
    #[error("Note not found")]
    NotFound,

    /// The note would end up with an empty title or content
    #[error("Invalid note: {0}")]
    InvalidNote(&'static str),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Owner of the new note
    pub owner_id: &'a str,

    /// Title of the note, not empty
    pub title: &'a str,

    /// Content of the note, not empty
    pub content: &'a str,
}

/// Values to update a Note
///
/// Only the fields that are set are changed
pub struct UpdateNoteValues<'a> {
    /// New title of the note
    pub title: Option<&'a str>,

    /// New content of the note
    pub content: Option<&'a str>,
}

/// Storage with all supported operations
///
/// Every operation is scoped to an owner, notes of other owners behave as if they do not exist
pub trait Storage: Clone + Send + Sync + 'static {
    /// Create a note
    ///
    /// Gets the next ID and both timestamps set to now
    fn create_note(&self, values: &CreateNoteValues<'_>) -> impl Future<Output = Result<Note>> + Send;

    /// Find all notes of an owner, ordered by ID
    fn find_all_notes_by_owner(&self, owner_id: &str) -> impl Future<Output = Vec<Note>> + Send;

    /// Find a single note of an owner
    fn find_single_note(&self, owner_id: &str, id: u64) -> impl Future<Output = Result<Note>> + Send;

    /// Update the title and/or content of a note
    ///
    /// Always refreshes `updated_at`
    fn update_note(
        &self,
        owner_id: &str,
        id: u64,
        values: &UpdateNoteValues<'_>,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// Delete a note
    ///
    /// The ID is never handed out again
    fn delete_note(&self, owner_id: &str, id: u64) -> impl Future<Output = Result<()>> + Send;

    /// Number of notes currently in storage, for all owners
    fn count_notes(&self) -> impl Future<Output = usize> + Send;
}

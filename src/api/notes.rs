//! Note API management

use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::identity::Owner;
use crate::notes::Note;
use crate::storage::CreateNoteValues;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;

use super::Error;
use super::ErrorBody;
use super::Form;
use super::PathParameters;
use super::Success;
use super::parse_text;

/// The note as served to the outside world
#[derive(Debug, Serialize, ToSchema)]
pub struct NoteResponse {
    /// Unique identifier of the note
    pub id: u64,

    /// Title of the note
    pub title: String,

    /// Body content of the note
    pub content: String,

    /// Owner identifier of the note
    pub owner_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl NoteResponse {
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            owner_id: note.owner_id,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }

    fn from_note_multiple(notes: Vec<Note>) -> Vec<Self> {
        notes.into_iter().map(Self::from_note).collect()
    }
}

/// ID of a note in the path, at least 1
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(try_from = "u64")]
pub struct NoteId(u64);

impl TryFrom<u64> for NoteId {
    type Error = &'static str;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        if id == 0 {
            Err("note ID must be at least 1")
        } else {
            Ok(Self(id))
        }
    }
}

/// List notes
///
/// List all notes of the current owner, oldest first.
///
/// ```sh
/// curl -v -H 'X-User-Id: u1' http://localhost:8000/notes
/// ```
#[utoipa::path(
    get,
    path = "/notes",
    params(
        ("X-User-Id" = Option<String>, Header, description = "Owner of the notes, `anonymous` when missing")
    ),
    responses(
        (status = 200, description = "List of notes", body = Vec<NoteResponse>)
    ),
    tag = "Notes"
)]
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    owner: Owner,
) -> Success<Vec<NoteResponse>> {
    let notes = storage.find_all_notes_by_owner(&owner).await;

    Success::ok(NoteResponse::from_note_multiple(notes))
}

/// Get note
///
/// Retrieve a single note of the current owner.
#[utoipa::path(
    get,
    path = "/notes/{note}",
    params(
        ("note" = u64, Path, description = "ID of the note, at least 1"),
        ("X-User-Id" = Option<String>, Header, description = "Owner of the note, `anonymous` when missing")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorBody),
        (status = 422, description = "Invalid note ID", body = ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    owner: Owner,
    PathParameters(NoteId(note_id)): PathParameters<NoteId>,
) -> Result<Success<NoteResponse>, Error> {
    let note = storage
        .find_single_note(&owner, note_id)
        .await
        .inspect_err(|_| tracing::debug!(r#"Note {note_id} not found for "{}""#, &*owner))?;

    Ok(Success::ok(NoteResponse::from_note(note)))
}

/// Create note form
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteForm {
    /// Title of the note
    #[schema(min_length = 1)]
    title: String,

    /// Body content of the note
    #[schema(min_length = 1)]
    content: String,
}

/// Create note
///
/// Create a new note for the current owner. Title and content are trimmed and may not end up
/// empty.
///
/// ```sh
/// curl -v -H 'Content-Type: application/json' -H 'X-User-Id: u1' \
///     -d '{ "title": "Groceries", "content": "Milk, eggs" }' \
///     http://localhost:8000/notes
/// ```
#[utoipa::path(
    post,
    path = "/notes",
    params(
        ("X-User-Id" = Option<String>, Header, description = "Owner of the note, `anonymous` when missing")
    ),
    request_body = CreateNoteForm,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 422, description = "Missing or empty title or content", body = ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    owner: Owner,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let values = CreateNoteValues {
        owner_id: &owner,
        title: parse_text("Title", &form.title)?,
        content: parse_text("Content", &form.content)?,
    };

    let note = storage.create_note(&values).await?;

    Ok(Success::created(NoteResponse::from_note(note)))
}

/// Update note form
///
/// Fields that are missing (or `null`) are left alone
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteForm {
    /// New title of the note
    #[schema(min_length = 1)]
    title: Option<String>,

    /// New body content of the note
    #[schema(min_length = 1)]
    content: Option<String>,
}

/// Update note
///
/// Update the title and/or content of a note of the current owner.
#[utoipa::path(
    put,
    path = "/notes/{note}",
    params(
        ("note" = u64, Path, description = "ID of the note, at least 1"),
        ("X-User-Id" = Option<String>, Header, description = "Owner of the note, `anonymous` when missing")
    ),
    request_body = UpdateNoteForm,
    responses(
        (status = 200, description = "Note updated", body = NoteResponse),
        (status = 400, description = "No fields to update", body = ErrorBody),
        (status = 404, description = "Note not found", body = ErrorBody),
        (status = 422, description = "Empty title or content, or invalid note ID", body = ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    owner: Owner,
    PathParameters(NoteId(note_id)): PathParameters<NoteId>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    if form.title.is_none() && form.content.is_none() {
        return Err(Error::bad_request("No fields to update"));
    }

    let values = UpdateNoteValues {
        title: form
            .title
            .as_deref()
            .map(|title| parse_text("Title", title))
            .transpose()?,
        content: form
            .content
            .as_deref()
            .map(|content| parse_text("Content", content))
            .transpose()?,
    };

    let note = storage.update_note(&owner, note_id, &values).await?;

    Ok(Success::ok(NoteResponse::from_note(note)))
}

/// Delete note
///
/// Delete a note of the current owner.
#[utoipa::path(
    delete,
    path = "/notes/{note}",
    params(
        ("note" = u64, Path, description = "ID of the note, at least 1"),
        ("X-User-Id" = Option<String>, Header, description = "Owner of the note, `anonymous` when missing")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found", body = ErrorBody),
        (status = 422, description = "Invalid note ID", body = ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    owner: Owner,
    PathParameters(NoteId(note_id)): PathParameters<NoteId>,
) -> Result<Success<&'static str>, Error> {
    storage.delete_note(&owner, note_id).await?;

    Ok(Success::<&'static str>::no_content())
}

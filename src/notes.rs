use chrono::DateTime;
use chrono::Utc;

/// A single note, owned by exactly one owner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// Store assigned identifier, never reused
    pub id: u64,

    /// Title of the note, never empty
    pub title: String,

    /// Body of the note, never empty
    pub content: String,

    /// Owner the note is scoped to
    pub owner_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Does the note belong to the given owner
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// Refresh `updated_at`
    ///
    /// Never moves backwards, even when the wall clock does
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }
}

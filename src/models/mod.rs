use serde::{Deserialize, Serialize};

/// A note as served by the notes API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Note {
    pub id: String,
    pub title: String,
    pub body: String,

    /// RFC 3339 timestamp (the API) or a bare `YYYY-MM-DD` date (fixtures).
    #[serde(rename = "createdAt")]
    pub created_at: String,

    /// Owner user id.
    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub archived: bool,
}

/// Local copy of a note, keyed by the note id in the bookmark store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BookmarkRecord {
    #[serde(flatten)]
    pub note: Note,
}

impl BookmarkRecord {
    pub fn id(&self) -> &str {
        &self.note.id
    }
}

impl From<Note> for BookmarkRecord {
    fn from(note: Note) -> Self {
        Self { note }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UserInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Payload pushed to the background worker.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NotificationPayload {
    pub title: String,
    #[serde(default)]
    pub options: NotificationBody,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NotificationBody {
    #[serde(default)]
    pub body: String,
    pub icon: Option<String>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_contract_deserialize() {
        let json = r#"{
            "id": "notes-V1StGXR8_Z5jdHi6B",
            "title": "Babel",
            "body": "Babel merupakan tools open-source.",
            "createdAt": "2022-04-14T04:27:34.572Z",
            "archived": false,
            "owner": "user-123"
        }"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert_eq!(note.id, "notes-V1StGXR8_Z5jdHi6B");
        assert_eq!(note.created_at, "2022-04-14T04:27:34.572Z");
        assert_eq!(note.owner, "user-123");
    }

    #[test]
    fn test_bookmark_record_is_flat_copy_of_note() {
        let note = Note {
            id: "n1".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            created_at: "2024-01-01".to_string(),
            owner: "u1".to_string(),
            archived: false,
        };
        let record = BookmarkRecord::from(note);
        let v = serde_json::to_value(&record).expect("should serialize");
        assert_eq!(v["id"], "n1");
        assert_eq!(v["createdAt"], "2024-01-01");
        assert_eq!(record.id(), "n1");
    }

    #[test]
    fn test_notification_payload_optional_media() {
        let json = r#"{"title": "Hi", "options": {"body": "New note"}}"#;
        let payload: NotificationPayload = serde_json::from_str(json).expect("should parse");
        assert_eq!(payload.options.body, "New note");
        assert!(payload.options.icon.is_none());
        assert!(payload.options.image.is_none());
    }
}

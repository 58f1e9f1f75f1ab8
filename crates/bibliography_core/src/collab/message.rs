//! Collaboration wire messages.
//!
//! Wire shape: `{"action": "add_item"|"edit_item"|"delete_row", "args": [text, type, values_json]}`
//! plus `id` (add) or `path` (edit/delete) carrying the target entry id.
//! Peers that send no id are matched by row content instead.

use crate::model::entry::{EntryId, EntryRow};
use serde::{Deserialize, Serialize};

/// One broadcast mutation of the shared entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollabMessage {
    AddItem {
        args: EntryRow,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<EntryId>,
    },
    EditItem {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<EntryId>,
        args: EntryRow,
        /// Row being replaced; used when `path` is missing or unknown.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous: Option<EntryRow>,
    },
    DeleteRow {
        args: EntryRow,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<EntryId>,
    },
}

impl CollabMessage {
    pub fn action(&self) -> &'static str {
        match self {
            Self::AddItem { .. } => "add_item",
            Self::EditItem { .. } => "edit_item",
            Self::DeleteRow { .. } => "delete_row",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::CollabMessage;
    use crate::model::entry::EntryRow;
    use serde_json::json;
    use uuid::Uuid;

    fn row() -> EntryRow {
        EntryRow {
            rendered_text: "<i>Rome</i> 2008".to_string(),
            type_name: "Book without Author".to_string(),
            raw_values_json: "[\"Rome\"]".to_string(),
        }
    }

    #[test]
    fn add_item_uses_action_and_args_fields() {
        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let message = CollabMessage::AddItem {
            args: row(),
            id: Some(id),
        };
        let value: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "action": "add_item",
                "args": ["<i>Rome</i> 2008", "Book without Author", "[\"Rome\"]"],
                "id": "11111111-2222-4333-8444-555555555555"
            })
        );
    }

    #[test]
    fn legacy_messages_without_ids_decode() {
        let message = CollabMessage::from_json(
            r#"{"action": "delete_row", "args": ["<i>Rome</i> 2008", "Book without Author", "[\"Rome\"]"]}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            CollabMessage::DeleteRow {
                args: row(),
                path: None
            }
        );
        assert_eq!(message.action(), "delete_row");
    }

    #[test]
    fn unknown_actions_are_rejected() {
        assert!(CollabMessage::from_json(r#"{"action": "shuffle", "args": []}"#).is_err());
    }
}

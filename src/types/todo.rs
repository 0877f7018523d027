use serde::{Deserialize, Serialize};

use super::ValidationError;

pub type TodoId = i64;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 100;
pub const PRIORITY_MIN: u8 = 1;
pub const PRIORITY_MAX: u8 = 5;

/// A stored todo item, as returned by storage and serialized to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    pub completed: bool,
}

impl Todo {
    pub fn from_fields(id: TodoId, fields: TodoFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            completed: fields.completed,
        }
    }
}

/// The mutable part of a todo. Values of this type have passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoFields {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<u8>,
    pub completed: bool,
}

impl TodoFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            completed: false,
        }
    }
}

/// Request body accepted by both create and update.
///
/// Update is a full replacement: optional fields left out of the body are
/// reset to their defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoRequest {
    pub fn into_fields(self) -> Result<TodoFields, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let title_len = self.title.chars().count();
        if title_len > TITLE_MAX_LEN {
            return Err(ValidationError::TitleTooLong {
                len: title_len,
                max: TITLE_MAX_LEN,
            });
        }

        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len == 0 || len > DESCRIPTION_MAX_LEN {
                return Err(ValidationError::DescriptionLength {
                    len,
                    max: DESCRIPTION_MAX_LEN,
                });
            }
        }

        if let Some(priority) = self.priority {
            if !(PRIORITY_MIN..=PRIORITY_MAX).contains(&priority) {
                return Err(ValidationError::PriorityOutOfRange {
                    value: priority,
                    min: PRIORITY_MIN,
                    max: PRIORITY_MAX,
                });
            }
        }

        Ok(TodoFields {
            title: self.title,
            description: self.description,
            priority: self.priority,
            completed: self.completed,
        })
    }
}

/// Parse a todo id taken from a request path. Ids start at 1.
pub fn parse_todo_id(raw: &str) -> Result<TodoId, ValidationError> {
    match raw.trim().parse::<TodoId>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ValidationError::InvalidId(raw.to_string())),
    }
}

//! Data models for the phonebook
//!
//! Defines the core data structures: the `Person` contact record that
//! travels between store, API, and client, and the client-only
//! `Notification` shown after mutations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A phonebook contact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Unique identifier, assigned by the store at insert
    pub id: Uuid,
    /// Contact name
    pub name: String,
    /// Phone number
    pub number: String,
}

impl Person {
    /// Create a new person with a freshly assigned id
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            number: number.into(),
        }
    }

    /// Create a person with a specific id (for loading from storage)
    pub fn with_id(id: Uuid, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            number: number.into(),
        }
    }
}

/// What kind of outcome a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A contact was created
    Added,
    /// An existing contact's number was replaced
    Updated,
    /// A contact was removed
    Deleted,
    /// A mutation failed; the message is the server's error text
    Error,
}

/// Ephemeral user-facing status message
///
/// Set when a mutating operation completes, cleared automatically after a
/// fixed display window. `seq` identifies this notification so that a clear
/// timer scheduled for an earlier message cannot erase a later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text shown to the user
    pub message: String,
    /// Outcome category (drives styling)
    pub kind: NotificationKind,
    /// Monotonically increasing sequence number within one state container
    pub seq: u64,
}

impl Notification {
    /// True when this notification reports a failure
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_new() {
        let person = Person::new("Arto Hellas", "040-123456");
        assert_eq!(person.name, "Arto Hellas");
        assert_eq!(person.number, "040-123456");
    }

    #[test]
    fn test_person_with_id() {
        let id = Uuid::new_v4();
        let person = Person::with_id(id, "Ada Lovelace", "39-44-5323523");
        assert_eq!(person.id, id);
        assert_eq!(person.name, "Ada Lovelace");
    }

    #[test]
    fn test_person_serialization() {
        let person = Person::new("Dan Abramov", "12-43-234345");
        let json = serde_json::to_string(&person).unwrap();
        let deserialized: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(person, deserialized);
    }

    #[test]
    fn test_person_json_field_names() {
        let person = Person::new("Mary Poppendieck", "39-23-6423122");
        let value = serde_json::to_value(&person).unwrap();
        assert!(value.get("id").is_some());
        assert_eq!(value["name"], "Mary Poppendieck");
        assert_eq!(value["number"], "39-23-6423122");
    }

    #[test]
    fn test_notification_is_error() {
        let ok = Notification {
            message: "Added Arto Hellas".to_string(),
            kind: NotificationKind::Added,
            seq: 1,
        };
        let err = Notification {
            message: "name missing".to_string(),
            kind: NotificationKind::Error,
            seq: 2,
        };
        assert!(!ok.is_error());
        assert!(err.is_error());
    }
}

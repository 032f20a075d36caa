//! Client-side state container
//!
//! Holds the local mirror of the server collection plus the draft form
//! fields, filter text, and the active notification. Every mutation of the
//! container goes through [`PhonebookState::apply`] with an explicit
//! [`Transition`], one per protocol outcome; the presentation layer only
//! reads state and dispatches intents.
//!
//! The local list is never mutated speculatively: transitions are built
//! from server responses, so the list and the server collection converge
//! after each successful call.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::models::{Notification, NotificationKind, Person};

/// Key identifying an in-flight mutation
///
/// Replace and delete address an existing record by id; a create has no id
/// yet, so it is keyed by the submitted name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKey {
    ById(Uuid),
    ByName(String),
}

/// What a form submission means, decided against the current local list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPlan {
    /// No entry with this exact name: create a new contact
    Create { name: String, number: String },
    /// An entry with this exact name exists: offer to replace its number
    Replace { existing: Person, number: String },
}

/// One protocol step applied to the state container
#[derive(Debug, Clone)]
pub enum Transition {
    /// Initial load finished; replaces the local list wholesale
    Loaded(Vec<Person>),
    /// Initial load failed
    LoadFailed(String),
    /// Create confirmed by the server
    CreateSucceeded(Person),
    /// Create rejected; drafts are retained
    CreateFailed { name: String, message: String },
    /// Replace confirmed by the server
    ReplaceSucceeded(Person),
    /// Replace rejected; drafts are retained
    ReplaceFailed { id: Uuid, message: String },
    /// Delete confirmed by the server
    DeleteSucceeded { id: Uuid, name: String },
    /// Delete failed; the local entry stays
    DeleteFailed { id: Uuid, message: String },
    /// Auto-clear timer fired for the notification with this seq
    ClearNotification(u64),
}

/// Client Sync Core state
#[derive(Debug, Default)]
pub struct PhonebookState {
    /// Local mirror of the server collection, in server order
    persons: Vec<Person>,
    /// Filter input (case-insensitive substring over names)
    pub filter_text: String,
    /// Draft form field: name
    pub draft_name: String,
    /// Draft form field: number
    pub draft_number: String,
    /// Active notification, if any
    notification: Option<Notification>,
    /// Sequence counter for notifications
    next_seq: u64,
    /// Keys of mutations currently awaiting a server response
    in_flight: HashSet<MutationKey>,
}

impl PhonebookState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full local list, in server order
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// The active notification, if one is displayed
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// The subset of persons whose name contains the filter text,
    /// case-insensitively. Purely derived; never mutates the list.
    pub fn visible(&self) -> Vec<&Person> {
        let needle = self.filter_text.to_lowercase();
        self.persons
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Find a person by id in the local list
    pub fn person(&self, id: Uuid) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    /// Decide whether submitting the drafts means a create or a replace
    ///
    /// The duplicate scan is an exact, case-sensitive name match - stricter
    /// than the display filter on purpose.
    pub fn plan_submit(&self) -> SubmitPlan {
        match self.persons.iter().find(|p| p.name == self.draft_name) {
            Some(existing) => SubmitPlan::Replace {
                existing: existing.clone(),
                number: self.draft_number.clone(),
            },
            None => SubmitPlan::Create {
                name: self.draft_name.clone(),
                number: self.draft_number.clone(),
            },
        }
    }

    /// Mark a mutation as in flight
    ///
    /// Returns false (and marks nothing) when a mutation with the same key
    /// is already pending; the caller should reject the new one instead of
    /// letting the two race.
    pub fn begin(&mut self, key: MutationKey) -> bool {
        self.in_flight.insert(key)
    }

    /// Whether a mutation with this key is awaiting a response
    pub fn is_in_flight(&self, key: &MutationKey) -> bool {
        self.in_flight.contains(key)
    }

    /// Set an error notification without a round trip (rejected intents)
    pub fn reject(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message.into(), NotificationKind::Error)
    }

    /// Apply one protocol step
    ///
    /// Returns the sequence number of the notification the step set, if
    /// any, so the caller can schedule its auto-clear.
    pub fn apply(&mut self, transition: Transition) -> Option<u64> {
        debug!(?transition, "apply transition");

        match transition {
            Transition::Loaded(persons) => {
                self.persons = persons;
                None
            }
            Transition::LoadFailed(message) => {
                Some(self.notify(message, NotificationKind::Error))
            }
            Transition::CreateSucceeded(person) => {
                self.in_flight.remove(&MutationKey::ByName(person.name.clone()));
                let message = format!("Added {}", person.name);
                self.persons.push(person);
                self.clear_drafts();
                Some(self.notify(message, NotificationKind::Added))
            }
            Transition::CreateFailed { name, message } => {
                self.in_flight.remove(&MutationKey::ByName(name));
                Some(self.notify(message, NotificationKind::Error))
            }
            Transition::ReplaceSucceeded(person) => {
                self.in_flight.remove(&MutationKey::ById(person.id));
                let message = format!("Updated the number of {}", person.name);
                for entry in &mut self.persons {
                    if entry.id == person.id {
                        *entry = person.clone();
                    }
                }
                self.clear_drafts();
                Some(self.notify(message, NotificationKind::Updated))
            }
            Transition::ReplaceFailed { id, message } => {
                self.in_flight.remove(&MutationKey::ById(id));
                Some(self.notify(message, NotificationKind::Error))
            }
            Transition::DeleteSucceeded { id, name } => {
                self.in_flight.remove(&MutationKey::ById(id));
                self.persons.retain(|p| p.id != id);
                Some(self.notify(format!("Deleted {}", name), NotificationKind::Deleted))
            }
            Transition::DeleteFailed { id, message } => {
                self.in_flight.remove(&MutationKey::ById(id));
                Some(self.notify(message, NotificationKind::Error))
            }
            Transition::ClearNotification(seq) => {
                // Only the timer belonging to the displayed notification may
                // clear it; stale timers are ignored.
                if self.notification.as_ref().map(|n| n.seq) == Some(seq) {
                    self.notification = None;
                }
                None
            }
        }
    }

    fn notify(&mut self, message: String, kind: NotificationKind) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.notification = Some(Notification { message, kind, seq });
        seq
    }

    fn clear_drafts(&mut self) {
        self.draft_name.clear();
        self.draft_number.clear();
    }
}

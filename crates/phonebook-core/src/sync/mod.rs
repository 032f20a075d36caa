//! Client Sync Core
//!
//! Keeps a client-held list of persons consistent with the server
//! collection across create, replace, and delete, and drives the
//! notifications shown after each outcome.
//!
//! Split into two halves:
//! - [`PhonebookState`]: the state container; pure transitions, no I/O
//! - [`SyncHandle`]: the async driver; spawns requests and emits the
//!   transitions the presentation loop applies
//!
//! The confirm-then-mutate steps (replace on a name collision, delete)
//! live with the presentation, which owns the prompt; the prompt texts are
//! provided here so every frontend words them the same way.

mod handle;
mod state;

pub use handle::{SyncHandle, NOTIFICATION_TTL};
pub use state::{MutationKey, PhonebookState, SubmitPlan, Transition};

/// Confirmation prompt for the replace branch of the submit protocol
pub fn replace_prompt(name: &str) -> String {
    format!(
        "{} is already added to phonebook, replace the old number with a new one?",
        name
    )
}

/// Confirmation prompt for the delete protocol
pub fn delete_prompt(name: &str) -> String {
    format!("Delete {}?", name)
}

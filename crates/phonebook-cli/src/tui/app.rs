//! TUI application state
//!
//! A view over the sync core: holds no business rules of its own, only the
//! input-mode state machine and the list selection. Mutation intents are
//! planned by `PhonebookState` and dispatched through `SyncHandle`; the
//! replace and delete flows pass through a confirm prompt first.

use uuid::Uuid;

use phonebook_core::sync::{
    delete_prompt, replace_prompt, MutationKey, PhonebookState, SubmitPlan, SyncHandle, Transition,
};
use phonebook_core::Person;

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Editing the name field of the add form
    Name,
    /// Editing the number field of the add form
    Number,
    /// Editing the filter text
    Filter,
    /// Awaiting y/n on a confirm prompt
    Confirm,
}

/// A mutation waiting on user confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Replace the number of an existing contact
    Replace {
        id: Uuid,
        name: String,
        number: String,
    },
    /// Delete a contact
    Delete { id: Uuid, name: String },
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// The sync core state container
    pub state: PhonebookState,
    /// Currently selected row in the visible list
    pub selected: usize,
    /// Action awaiting confirmation, if any
    pub pending: Option<PendingAction>,
    /// Text of the active confirm prompt
    pub confirm_text: String,
    /// Whether the initial load is still in flight
    pub is_loading: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            state: PhonebookState::new(),
            selected: 0,
            pending: None,
            confirm_text: String::new(),
            is_loading: true,
        }
    }

    /// The person under the cursor, if the visible list isn't empty
    pub fn selected_person(&self) -> Option<&Person> {
        self.state.visible().get(self.selected).copied()
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        let len = self.state.visible().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the visible list
    fn clamp_selection(&mut self) {
        let len = self.state.visible().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Enter the add form, starting at the name field
    pub fn enter_add_form(&mut self) {
        self.input_mode = InputMode::Name;
    }

    /// Enter filter editing mode
    pub fn enter_filter_mode(&mut self) {
        self.input_mode = InputMode::Filter;
    }

    /// Leave any input mode; drafts and filter text are kept
    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Append a character to whichever field is being edited
    pub fn insert_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::Name => self.state.draft_name.push(c),
            InputMode::Number => self.state.draft_number.push(c),
            InputMode::Filter => {
                self.state.filter_text.push(c);
                self.clamp_selection();
            }
            _ => {}
        }
    }

    /// Remove the last character of whichever field is being edited
    pub fn delete_char(&mut self) {
        match self.input_mode {
            InputMode::Name => {
                self.state.draft_name.pop();
            }
            InputMode::Number => {
                self.state.draft_number.pop();
            }
            InputMode::Filter => {
                self.state.filter_text.pop();
                self.clamp_selection();
            }
            _ => {}
        }
    }

    /// Submit the add form
    ///
    /// The create branch dispatches immediately; the replace branch parks
    /// the mutation behind a confirm prompt.
    pub fn submit_form(&mut self, handle: &SyncHandle) {
        match self.state.plan_submit() {
            SubmitPlan::Create { name, number } => {
                if !self.state.begin(MutationKey::ByName(name.clone())) {
                    let seq = self
                        .state
                        .reject(format!("Another change to {} is still pending", name));
                    handle.schedule_clear(seq);
                    self.input_mode = InputMode::Normal;
                    return;
                }
                handle.create(name, number);
                self.input_mode = InputMode::Normal;
            }
            SubmitPlan::Replace { existing, number } => {
                if self.state.is_in_flight(&MutationKey::ById(existing.id)) {
                    let seq = self.state.reject(format!(
                        "Another change to {} is still pending",
                        existing.name
                    ));
                    handle.schedule_clear(seq);
                    self.input_mode = InputMode::Normal;
                    return;
                }
                self.confirm_text = replace_prompt(&existing.name);
                self.pending = Some(PendingAction::Replace {
                    id: existing.id,
                    name: existing.name,
                    number,
                });
                self.input_mode = InputMode::Confirm;
            }
        }
    }

    /// Ask to delete the selected contact
    pub fn request_delete(&mut self, handle: &SyncHandle) {
        let Some(person) = self.selected_person().cloned() else {
            return;
        };

        if self.state.is_in_flight(&MutationKey::ById(person.id)) {
            let seq = self.state.reject(format!(
                "Another change to {} is still pending",
                person.name
            ));
            handle.schedule_clear(seq);
            return;
        }

        self.confirm_text = delete_prompt(&person.name);
        self.pending = Some(PendingAction::Delete {
            id: person.id,
            name: person.name,
        });
        self.input_mode = InputMode::Confirm;
    }

    /// Confirm the pending action and dispatch its request
    pub fn confirm_yes(&mut self, handle: &SyncHandle) {
        if let Some(action) = self.pending.take() {
            match action {
                PendingAction::Replace { id, name, number } => {
                    if self.state.begin(MutationKey::ById(id)) {
                        handle.replace(id, name, number);
                    }
                }
                PendingAction::Delete { id, name } => {
                    if self.state.begin(MutationKey::ById(id)) {
                        handle.delete(id, name);
                    }
                }
            }
        }
        self.confirm_text.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Decline the pending action: no request, no state change
    pub fn confirm_no(&mut self) {
        self.pending = None;
        self.confirm_text.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Apply a sync transition and schedule the clear for any notification
    /// it set
    pub fn apply_event(&mut self, handle: &SyncHandle, transition: Transition) {
        if matches!(
            transition,
            Transition::Loaded(_) | Transition::LoadFailed(_)
        ) {
            self.is_loading = false;
        }

        if let Some(seq) = self.state.apply(transition) {
            handle.schedule_clear(seq);
        }
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonebook_core::PersonClient;

    fn test_handle() -> SyncHandle {
        SyncHandle::new(PersonClient::new("http://127.0.0.1:1"))
    }

    fn loaded_app(persons: Vec<Person>) -> App {
        let mut app = App::new();
        app.state.apply(Transition::Loaded(persons));
        app.is_loading = false;
        app
    }

    #[test]
    fn test_add_form_flow() {
        let mut app = App::new();
        assert_eq!(app.input_mode, InputMode::Normal);

        app.enter_add_form();
        assert_eq!(app.input_mode, InputMode::Name);

        for c in "Arto".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.state.draft_name, "Arto");

        app.input_mode = InputMode::Number;
        for c in "040".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.state.draft_number, "040");

        app.delete_char();
        assert_eq!(app.state.draft_number, "04");
    }

    #[tokio::test]
    async fn test_submit_new_name_dispatches_create() {
        let handle = test_handle();
        let mut app = loaded_app(vec![]);

        app.enter_add_form();
        app.state.draft_name = "Arto Hellas".to_string();
        app.state.draft_number = "040-123456".to_string();

        app.submit_form(&handle);

        // No confirmation needed; back to normal mode with the mutation
        // marked in flight
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.pending.is_none());
        assert!(app
            .state
            .is_in_flight(&MutationKey::ByName("Arto Hellas".to_string())));
    }

    #[tokio::test]
    async fn test_submit_collision_asks_for_confirmation() {
        let handle = test_handle();
        let existing = Person::new("Arto Hellas", "040-123456");
        let mut app = loaded_app(vec![existing.clone()]);

        app.enter_add_form();
        app.state.draft_name = "Arto Hellas".to_string();
        app.state.draft_number = "045-999999".to_string();

        app.submit_form(&handle);

        assert_eq!(app.input_mode, InputMode::Confirm);
        assert_eq!(
            app.pending,
            Some(PendingAction::Replace {
                id: existing.id,
                name: "Arto Hellas".to_string(),
                number: "045-999999".to_string(),
            })
        );
        assert!(app.confirm_text.contains("already added to phonebook"));

        // Nothing is in flight until the user says yes
        assert!(!app.state.is_in_flight(&MutationKey::ById(existing.id)));
    }

    #[tokio::test]
    async fn test_declining_confirmation_changes_nothing() {
        let handle = test_handle();
        let existing = Person::new("Arto Hellas", "040-123456");
        let mut app = loaded_app(vec![existing.clone()]);

        app.state.draft_name = "Arto Hellas".to_string();
        app.state.draft_number = "045-999999".to_string();
        app.submit_form(&handle);
        app.confirm_no();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.pending.is_none());
        assert!(app.state.notification().is_none());
        assert!(!app.state.is_in_flight(&MutationKey::ById(existing.id)));
        // Drafts are untouched by a declined confirm
        assert_eq!(app.state.draft_number, "045-999999");
    }

    #[tokio::test]
    async fn test_confirming_replace_marks_in_flight() {
        let handle = test_handle();
        let existing = Person::new("Arto Hellas", "040-123456");
        let mut app = loaded_app(vec![existing.clone()]);

        app.state.draft_name = "Arto Hellas".to_string();
        app.state.draft_number = "045-999999".to_string();
        app.submit_form(&handle);
        app.confirm_yes(&handle);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.state.is_in_flight(&MutationKey::ById(existing.id)));
    }

    #[tokio::test]
    async fn test_delete_flow_confirms_first() {
        let handle = test_handle();
        let person = Person::new("Mary Poppendieck", "39-23-6423122");
        let mut app = loaded_app(vec![person.clone()]);

        app.request_delete(&handle);
        assert_eq!(app.input_mode, InputMode::Confirm);
        assert_eq!(app.confirm_text, "Delete Mary Poppendieck?");

        app.confirm_yes(&handle);
        assert!(app.state.is_in_flight(&MutationKey::ById(person.id)));
    }

    #[tokio::test]
    async fn test_double_submission_is_rejected() {
        let handle = test_handle();
        let existing = Person::new("Arto Hellas", "040-123456");
        let mut app = loaded_app(vec![existing.clone()]);

        // First replace is confirmed and in flight
        app.state.draft_name = "Arto Hellas".to_string();
        app.state.draft_number = "045-999999".to_string();
        app.submit_form(&handle);
        app.confirm_yes(&handle);

        // Second submit against the same contact is rejected outright
        app.state.draft_name = "Arto Hellas".to_string();
        app.state.draft_number = "046-000000".to_string();
        app.submit_form(&handle);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.pending.is_none());
        let n = app.state.notification().unwrap();
        assert!(n.is_error());
        assert!(n.message.contains("still pending"));
    }

    #[test]
    fn test_selection_follows_filter() {
        let mut app = loaded_app(vec![
            Person::new("Ana Lopez", "1"),
            Person::new("BANANA Corp", "2"),
            Person::new("Bob", "3"),
        ]);

        app.move_down();
        app.move_down();
        assert_eq!(app.selected, 2);

        // Narrowing the filter pulls the selection back into range
        app.enter_filter_mode();
        for c in "ana".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.state.visible().len(), 2);
        assert_eq!(app.selected, 1);
        assert_eq!(app.selected_person().unwrap().name, "BANANA Corp");
    }

    #[tokio::test]
    async fn test_apply_event_clears_loading() {
        let handle = test_handle();
        let mut app = App::new();
        assert!(app.is_loading);

        app.apply_event(&handle, Transition::Loaded(vec![]));
        assert!(!app.is_loading);
    }
}

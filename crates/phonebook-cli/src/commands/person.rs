//! Contact command handlers
//!
//! Headless versions of the flows the TUI drives: they go through the same
//! decision layer (`PhonebookState::plan_submit`), so a name collision
//! prompts for the replace here too.

use anyhow::{bail, Result};
use uuid::Uuid;

use phonebook_core::sync::{delete_prompt, replace_prompt, SubmitPlan};
use phonebook_core::{Config, PersonClient, PhonebookState, Transition};

use crate::commands::confirm;
use crate::output::Output;

/// List all contacts
pub async fn list(config: &Config, output: &Output) -> Result<()> {
    let client = PersonClient::new(&config.server_url);
    let persons = client.list().await?;

    output.print_persons(&persons);
    Ok(())
}

/// Add a contact, or replace the number of an existing one
pub async fn add(config: &Config, name: String, number: String, output: &Output) -> Result<()> {
    let client = PersonClient::new(&config.server_url);

    // Load the collection so the duplicate scan sees current server state
    let mut state = PhonebookState::new();
    state.apply(Transition::Loaded(client.list().await?));
    state.draft_name = name;
    state.draft_number = number;

    match state.plan_submit() {
        SubmitPlan::Create { name, number } => {
            let created = client.create(&name, &number).await?;
            output.success(&format!("Added {}", created.name));
            output.print_person(&created);
        }
        SubmitPlan::Replace { existing, number } => {
            if output.should_prompt() && !confirm(&replace_prompt(&existing.name))? {
                println!("Cancelled.");
                return Ok(());
            }
            let updated = client.update(existing.id, &existing.name, &number).await?;
            output.success(&format!("Updated the number of {}", updated.name));
            output.print_person(&updated);
        }
    }

    Ok(())
}

/// Delete a contact by id
pub async fn delete(config: &Config, id: String, output: &Output) -> Result<()> {
    let Ok(id) = Uuid::parse_str(&id) else {
        bail!("Malformed id: {}", id);
    };

    let client = PersonClient::new(&config.server_url);

    let persons = client.list().await?;
    let Some(person) = persons.iter().find(|p| p.id == id) else {
        bail!("Contact not found: {}", id);
    };

    if output.should_prompt() && !confirm(&delete_prompt(&person.name))? {
        println!("Cancelled.");
        return Ok(());
    }

    client.delete(id).await?;
    output.success(&format!("Deleted {}", person.name));

    Ok(())
}

/// Show server status
pub async fn info(config: &Config, output: &Output) -> Result<()> {
    let client = PersonClient::new(&config.server_url);
    let body = client.info().await?;

    output.print_info(&body);
    Ok(())
}

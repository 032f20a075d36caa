//! Request handlers for the REST endpoints
//!
//! Thin translation between HTTP and the Collection Store: parse the
//! identifier, run the presence checks, forward to the store, map store
//! outcomes to the error taxonomy. No duplicate-name rejection happens
//! here - that decision belongs to the client.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::error::ApiError;
use crate::models::Person;
use crate::store::PersonStore;

/// Shared state behind every handler
pub struct ApiContext {
    store: Mutex<PersonStore>,
}

impl ApiContext {
    /// Wrap a store for use by the router
    pub fn new(store: PersonStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Lock the store; a poisoned lock surfaces as an unhandled error
    fn store(&self) -> Result<MutexGuard<'_, PersonStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("store lock poisoned")))
    }
}

/// Request body for create and update
#[derive(Debug, Deserialize)]
pub struct PersonPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl PersonPayload {
    /// Presence checks: a field is missing when absent or empty
    fn validate(self) -> Result<(String, String), ApiError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or(ApiError::MissingField("name"))?;
        let number = self
            .number
            .filter(|n| !n.is_empty())
            .ok_or(ApiError::MissingField("number"))?;
        Ok((name, number))
    }
}

/// Parse a path segment into an identifier, or report its shape as malformed
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::MalformedId)
}

/// GET /api/persons
pub async fn list_persons(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let persons = ctx.store()?.all()?;
    Ok(Json(persons))
}

/// GET /api/persons/:id
pub async fn get_person(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    let id = parse_id(&id)?;
    let person = ctx.store()?.get(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(person))
}

/// POST /api/persons
pub async fn create_person(
    State(ctx): State<Arc<ApiContext>>,
    Json(payload): Json<PersonPayload>,
) -> Result<Json<Person>, ApiError> {
    debug!(?payload, "create person");
    let (name, number) = payload.validate()?;
    let person = ctx.store()?.insert(&name, &number)?;
    Ok(Json(person))
}

/// PUT /api/persons/:id
pub async fn update_person(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<String>,
    Json(payload): Json<PersonPayload>,
) -> Result<Json<Person>, ApiError> {
    let id = parse_id(&id)?;
    let (name, number) = payload.validate()?;
    let person = ctx
        .store()?
        .update(id, &name, &number)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(person))
}

/// DELETE /api/persons/:id
///
/// Succeeds whether or not the record still exists; there is no distinct
/// "already gone" signal.
pub async fn delete_person(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    ctx.store()?.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /info
pub async fn info(State(ctx): State<Arc<ApiContext>>) -> Result<Html<String>, ApiError> {
    let count = ctx.store()?.count()?;
    let time = Local::now();
    Ok(Html(format!(
        "<p>Phonebook has info for {} people</p><p>{}</p>",
        count, time
    )))
}

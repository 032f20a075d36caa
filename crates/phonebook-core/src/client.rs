//! HTTP client for the phonebook API
//!
//! The client collaborator the sync core talks through: list, create,
//! update-by-id, delete-by-id, plus the informational status endpoint.
//! A failed request surfaces the server's `{"error": ...}` payload as the
//! error message when one is present - that text is what ends up in the
//! error notification.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Person;

/// Errors raised by API calls
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an error payload
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Error payload shape the server uses for all failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the phonebook REST API
#[derive(Debug, Clone)]
pub struct PersonClient {
    http: reqwest::Client,
    base_url: String,
}

impl PersonClient {
    /// Create a client against a server base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// GET /api/persons
    pub async fn list(&self) -> Result<Vec<Person>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/persons", self.base_url))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// POST /api/persons
    pub async fn create(&self, name: &str, number: &str) -> Result<Person, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/persons", self.base_url))
            .json(&json!({ "name": name, "number": number }))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// PUT /api/persons/:id
    pub async fn update(&self, id: Uuid, name: &str, number: &str) -> Result<Person, ClientError> {
        let response = self
            .http
            .put(format!("{}/api/persons/{}", self.base_url, id))
            .json(&json!({ "name": name, "number": number }))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// DELETE /api/persons/:id
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/api/persons/{}", self.base_url, id))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// GET /info
    pub async fn info(&self) -> Result<String, ClientError> {
        let response = self.http.get(format!("{}/info", self.base_url)).send().await?;
        let response = check(response).await?;
        Ok(response.text().await?)
    }
}

/// Turn a non-success response into an API error carrying the server's
/// error message (or a generic one if the body isn't the expected shape)
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("server returned status {}", status.as_u16()),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

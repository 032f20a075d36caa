//! Phonebook Core Library
//!
//! This crate provides the core functionality for the phonebook: a REST
//! API over a document collection of contacts, the HTTP client that talks
//! to it, and the client-side sync core that keeps a local list consistent
//! with the server across create, replace, and delete.
//!
//! # Architecture
//!
//! - **Store**: SQLite-backed collection of Person records
//! - **API**: axum handlers translating HTTP to store operations
//! - **Client**: reqwest wrapper returning parsed payloads or the
//!   server's error message
//! - **Sync**: state container with explicit transitions, plus the async
//!   driver that spawns requests and emits outcomes
//!
//! # Quick Start
//!
//! ```text
//! let store = PersonStore::open(&config)?;
//! let app = api::router(store);
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Modules
//!
//! - `models`: Person and Notification data structures
//! - `store`: Collection Store (main persistence entry point)
//! - `api`: REST endpoint handlers and error taxonomy
//! - `client`: HTTP client collaborator
//! - `sync`: Client Sync Core (state + driver)
//! - `config`: Application configuration

pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod store;
pub mod sync;

pub use api::ApiError;
pub use client::{ClientError, PersonClient};
pub use config::Config;
pub use models::{Notification, NotificationKind, Person};
pub use store::{PersonStore, StoreError};
pub use sync::{PhonebookState, SubmitPlan, SyncHandle, Transition};

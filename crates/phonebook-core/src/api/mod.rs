//! API Layer
//!
//! Exposes the CRUD endpoints over the Collection Store and translates
//! store failures into the HTTP error taxonomy:
//!
//! | Method | Path               | Success            | Failure           |
//! |--------|--------------------|--------------------|-------------------|
//! | GET    | `/api/persons`     | 200, array         | -                 |
//! | GET    | `/info`            | 200, HTML fragment | -                 |
//! | GET    | `/api/persons/:id` | 200, person        | 404 / 400         |
//! | POST   | `/api/persons`     | 200, created       | 400 field missing |
//! | PUT    | `/api/persons/:id` | 200, updated       | 400 / 404         |
//! | DELETE | `/api/persons/:id` | 204, empty         | 400               |

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{ApiContext, PersonPayload};

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::store::PersonStore;

/// Build the application router over a store
pub fn router(store: PersonStore) -> Router {
    let ctx = Arc::new(ApiContext::new(store));

    Router::new()
        .route(
            "/api/persons",
            get(handlers::list_persons).post(handlers::create_person),
        )
        .route(
            "/api/persons/:id",
            get(handlers::get_person)
                .put(handlers::update_person)
                .delete(handlers::delete_person),
        )
        .route("/info", get(handlers::info))
        .layer(middleware::from_fn(log_requests))
        .with_state(ctx)
}

/// Request logging middleware: method, path, status, latency
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );
    response
}

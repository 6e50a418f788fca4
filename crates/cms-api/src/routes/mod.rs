//! HTTP routes.

mod contacts;
mod health;

use axum::Router;
use axum::routing::get;
use cms_service::ContactService;

use crate::config::PaginationConfig;

pub use contacts::ListContactsParams;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Contact operations
    pub service: ContactService,
    /// Listing limits
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Bundles a service with listing limits.
    pub fn new(service: ContactService, pagination: PaginationConfig) -> Self {
        Self {
            service,
            pagination,
        }
    }
}

/// Builds the application router (without middleware layers).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route("/api/contacts/all", get(contacts::all_contacts))
        .route(
            "/api/contacts/{id}",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .with_state(state)
}

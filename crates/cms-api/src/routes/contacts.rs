//! `/api/contacts` handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use cms_core::{ContactDto, ContactId, CreateContactRequest, Page};
use serde::Deserialize;

use super::AppState;
use crate::Result;

/// Query parameters of `GET /api/contacts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContactsParams {
    /// Zero-based page index
    #[serde(default)]
    pub page: u32,
    /// Page size; the configured default when absent
    #[serde(default)]
    pub size: Option<u32>,
    /// Case-insensitive substring matched against name and email
    #[serde(default)]
    pub search: Option<String>,
    /// Sort property
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// `asc` or `desc`
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

fn default_sort_by() -> String {
    "name".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

impl Default for ListContactsParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: None,
            search: None,
            sort_by: default_sort_by(),
            sort_dir: default_sort_dir(),
        }
    }
}

pub(super) async fn list_contacts(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListContactsParams>, QueryRejection>,
) -> Result<Json<Page<ContactDto>>> {
    let Query(params) = params?;
    let size = params.size.unwrap_or(state.pagination.default_size);
    state.pagination.check_size(size)?;

    tracing::info!(
        page = params.page,
        size,
        search = params.search.as_deref(),
        sort_by = %params.sort_by,
        sort_dir = %params.sort_dir,
        "Fetching contacts"
    );

    let page = state
        .service
        .get_contacts_paged_filtered(
            params.page,
            size,
            params.search.as_deref(),
            &params.sort_by,
            &params.sort_dir,
        )
        .await?;
    Ok(Json(page))
}

pub(super) async fn all_contacts(State(state): State<AppState>) -> Result<Json<Vec<ContactDto>>> {
    tracing::info!("Fetching all contacts");
    Ok(Json(state.service.get_all_contacts().await?))
}

pub(super) async fn get_contact(
    State(state): State<AppState>,
    id: std::result::Result<Path<ContactId>, PathRejection>,
) -> Result<Json<ContactDto>> {
    let Path(id) = id?;
    tracing::info!(contact_id = %id, "Fetching contact");
    Ok(Json(state.service.get_contact_by_id(id).await?))
}

pub(super) async fn create_contact(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactDto>)> {
    let Json(request) = body?;
    tracing::info!("Creating contact");
    let new_contact = request.validate()?;
    let created = state.service.create_contact(new_contact).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(super) async fn update_contact(
    State(state): State<AppState>,
    id: std::result::Result<Path<ContactId>, PathRejection>,
    body: std::result::Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<Json<ContactDto>> {
    let Path(id) = id?;
    let Json(request) = body?;
    tracing::info!(contact_id = %id, "Updating contact");
    Ok(Json(state.service.update_contact(id, &request).await?))
}

pub(super) async fn delete_contact(
    State(state): State<AppState>,
    id: std::result::Result<Path<ContactId>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    tracing::info!(contact_id = %id, "Deleting contact");
    state.service.delete_contact(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

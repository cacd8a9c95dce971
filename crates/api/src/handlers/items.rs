use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{ApiError, AppState};
use db::{Item, ItemUpdate, NewItem};

/// Inbound item body for create and replace.
///
/// `id` and `created_at` are not part of it; if a client sends them they are
/// dropped during deserialisation.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemPayload {
    fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let payload: Self = serde_json::from_slice(body).map_err(ApiError::InvalidBody)?;
        if payload.name.trim().is_empty() {
            return Err(ApiError::InvalidName);
        }
        Ok(payload)
    }

    fn into_fields(self) -> (String, Option<String>) {
        (self.name, self.description.filter(|d| !d.is_empty()))
    }
}

/// The `{id}` path segment as an item key.
///
/// Every way the segment can be unusable (bad percent-encoding, invalid
/// UTF-8, not an `i64`) becomes [`ApiError::InvalidId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ItemId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))?;

        raw.parse()
            .map(ItemId)
            .map_err(|err| ApiError::InvalidId(format!("{raw:?}: {err}")))
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.repo.list_all().await?;
    Ok(Json(items))
}

pub async fn get(
    ItemId(id): ItemId,
    State(state): State<AppState>,
) -> Result<Json<Item>, ApiError> {
    let item = state.repo.get_by_id(id).await?;
    Ok(Json(item))
}

/// `created_at` is stamped here; storage assigns `id`.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let (name, description) = ItemPayload::parse(&body)?.into_fields();

    let item = state.repo.create(&NewItem::now(name, description)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Full replacement of the mutable fields; `created_at` is left alone.
pub async fn replace(
    ItemId(id): ItemId,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let (name, description) = ItemPayload::parse(&body)?.into_fields();

    state
        .repo
        .update(&ItemUpdate { id, name, description })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    ItemId(id): ItemId,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    state.repo.delete(id).await?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")]))
}

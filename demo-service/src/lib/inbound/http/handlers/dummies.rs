use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use crate::domain::dummy::models::Dummy;
use crate::domain::dummy::models::DummyPatch;
use crate::domain::dummy::models::NewDummy;
use crate::inbound::http::router::AppState;

const MIN_FIELD_LENGTH: usize = 1;
const MAX_FIELD_LENGTH: usize = 100;

pub async fn list_dummies(
    State(state): State<AppState>,
) -> Result<Json<Vec<DummyResponse>>, ApiError> {
    let dummies = state.dummy_service.list().await.map_err(ApiError::from)?;

    Ok(Json(dummies.iter().map(DummyResponse::from).collect()))
}

pub async fn get_dummy(
    State(state): State<AppState>,
    Path(dummy_id): Path<i64>,
) -> Result<Json<DummyResponse>, ApiError> {
    state
        .dummy_service
        .get(dummy_id)
        .await
        .map(|ref dummy| Json(dummy.into()))
        .map_err(ApiError::from)
}

pub async fn create_dummy(
    State(state): State<AppState>,
    Json(body): Json<DummyRequest>,
) -> Result<(StatusCode, Json<DummyResponse>), ApiError> {
    let dummy = state
        .dummy_service
        .create(body.try_into_new()?)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(DummyResponse::from(&dummy))))
}

pub async fn replace_dummy(
    State(state): State<AppState>,
    Path(dummy_id): Path<i64>,
    Json(body): Json<DummyRequest>,
) -> Result<Json<DummyResponse>, ApiError> {
    state
        .dummy_service
        .replace(dummy_id, body.try_into_new()?)
        .await
        .map(|ref dummy| Json(dummy.into()))
        .map_err(ApiError::from)
}

pub async fn update_dummy(
    State(state): State<AppState>,
    Path(dummy_id): Path<i64>,
    Json(body): Json<PatchDummyRequest>,
) -> Result<Json<DummyResponse>, ApiError> {
    state
        .dummy_service
        .update(dummy_id, body.try_into_patch()?)
        .await
        .map(|ref dummy| Json(dummy.into()))
        .map_err(ApiError::from)
}

pub async fn delete_dummy(
    State(state): State<AppState>,
    Path(dummy_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .dummy_service
        .delete(dummy_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(ApiError::from)
}

/// HTTP request body for creating or fully replacing a dummy (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DummyRequest {
    name: String,
    description: String,
    optional_field: Option<String>,
}

/// HTTP request body for a partial update; absent fields stay unchanged
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchDummyRequest {
    name: Option<String>,
    description: Option<String>,
    optional_field: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseDummyRequestError {
    #[error("Field '{field}' must be between {min} and {max} characters")]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

fn validate_field(field: &'static str, value: &str) -> Result<(), ParseDummyRequestError> {
    let length = value.chars().count();
    if length < MIN_FIELD_LENGTH || length > MAX_FIELD_LENGTH {
        return Err(ParseDummyRequestError::InvalidLength {
            field,
            min: MIN_FIELD_LENGTH,
            max: MAX_FIELD_LENGTH,
        });
    }
    Ok(())
}

impl DummyRequest {
    fn try_into_new(self) -> Result<NewDummy, ParseDummyRequestError> {
        validate_field("name", &self.name)?;
        validate_field("description", &self.description)?;

        Ok(NewDummy {
            name: self.name,
            description: self.description,
            optional_field: self.optional_field,
        })
    }
}

impl PatchDummyRequest {
    fn try_into_patch(self) -> Result<DummyPatch, ParseDummyRequestError> {
        if let Some(ref name) = self.name {
            validate_field("name", name)?;
        }
        if let Some(ref description) = self.description {
            validate_field("description", description)?;
        }

        Ok(DummyPatch {
            name: self.name,
            description: self.description,
            optional_field: self.optional_field,
        })
    }
}

impl From<ParseDummyRequestError> for ApiError {
    fn from(err: ParseDummyRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DummyResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub optional_field: Option<String>,
}

impl From<&Dummy> for DummyResponse {
    fn from(dummy: &Dummy) -> Self {
        Self {
            id: dummy.id,
            name: dummy.name.clone(),
            description: dummy.description.clone(),
            optional_field: dummy.optional_field.clone(),
        }
    }
}

use axum::{
    async_trait,
    body::HttpBody,
    extract::{FromRequest, Json},
    http::Request,
    BoxError,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Create payload: the entity's own fields plus the shared `isActive` flag.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "C: DeserializeOwned"))]
pub struct CreateRequest<C> {
    #[serde(flatten)]
    pub fields: C,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
}

impl<C: Validate> Validate for CreateRequest<C> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.fields.validate()
    }
}

/// Partial update payload; must carry at least one field.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "U: DeserializeOwned"))]
pub struct UpdateRequest<U> {
    #[serde(flatten)]
    pub fields: U,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
}

impl<U: Validate> Validate for UpdateRequest<U> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.fields.validate()
    }
}

/// JSON body that is deserialized and schema-checked before the handler runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(decode_and_validate(value)?))
    }
}

/// Like [`ValidatedJson`] but refuses an empty object.
#[derive(Debug)]
pub struct ValidatedPatch<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedPatch<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        if value.as_object().map_or(true, |fields| fields.is_empty()) {
            return Err(AppError::Validation(
                "At least one field must be provided for update".into(),
            ));
        }
        Ok(Self(decode_and_validate(value)?))
    }
}

fn decode_and_validate<T>(value: Value) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let decoded: T =
        serde_json::from_value(value).map_err(|err| AppError::Validation(err.to_string()))?;
    decoded
        .validate()
        .map_err(|errors| AppError::Validation(first_message(&errors)))?;
    Ok(decoded)
}

/// First failing field in name order, so responses are stable.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .first()
        .and_then(|(field, list)| {
            list.first().map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}

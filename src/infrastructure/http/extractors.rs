//! Extractors that decode a request part and run its `validator` rules,
//! rejecting with an itemized 400 before the handler runs.

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::infrastructure::http::envelope::{FieldError, FieldLocation};
use crate::infrastructure::http::middleware::error::ApiError;

pub struct ValidatedJson<T>(pub T);
/// Like [`ValidatedJson`], but a missing or blank body decodes as `T::default()`.
pub struct ValidatedJsonOrDefault<T>(pub T);
pub struct ValidatedQuery<T>(pub T);
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| decode_error("body", FieldLocation::Body, rejection.body_text()))?;
        check(&value, FieldLocation::Body)?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJsonOrDefault<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, bytes) = buffer_body(req)
            .await
            .map_err(|rejection| decode_error("body", FieldLocation::Body, rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            let value = T::default();
            check(&value, FieldLocation::Body)?;
            return Ok(Self(value));
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        let ValidatedJson(value) = ValidatedJson::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| decode_error("query", FieldLocation::Query, rejection.body_text()))?;
        check(&value, FieldLocation::Query)?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| decode_error("params", FieldLocation::Params, rejection.body_text()))?;
        check(&value, FieldLocation::Params)?;
        Ok(Self(value))
    }
}

/// Read the whole body under the router's body limit, keeping the request head.
pub async fn buffer_body(req: Request) -> Result<(Parts, Bytes), BytesRejection> {
    let (parts, body) = req.into_parts();
    let mut buffered = Request::new(body);
    *buffered.extensions_mut() = parts.extensions.clone();
    let bytes = Bytes::from_request(buffered, &()).await?;
    Ok((parts, bytes))
}

fn decode_error(field: &str, location: FieldLocation, message: String) -> ApiError {
    ApiError::Validation(vec![FieldError::new(field, location, message)])
}

fn check<T: Validate>(value: &T, location: FieldLocation) -> Result<(), ApiError> {
    value
        .validate()
        .map_err(|errors| ApiError::Validation(field_errors(&errors, location)))
}

/// Flatten `validator` output into one entry per failed rule, ordered by field.
pub fn field_errors(errors: &ValidationErrors, location: FieldLocation) -> Vec<FieldError> {
    let mut items: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            let field = field.to_string();
            failures.iter().map(move |failure| {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(&field, failure));
                FieldError::new(field.clone(), location, message)
            })
        })
        .collect();
    items.sort_by(|a, b| a.field.cmp(&b.field));
    items
}

/// Used for rules declared without a `message`.
fn default_message(field: &str, failure: &ValidationError) -> String {
    format!("Invalid value for {} ({})", field, failure.code)
}

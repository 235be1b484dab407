use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use garde::Validate;
use serde::de::DeserializeOwned;
use shared::error::AppError;

/// JSON body that has been deserialized and validated.
///
/// Malformed bodies and missing fields are reported as 400 together with
/// field validation failures, instead of axum's default 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate<Context = ()>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidField(rejection.body_text()))?;
        value.validate(&())?;
        Ok(Self(value))
    }
}

/// Resource id taken from the path.
///
/// A segment that is not a valid id cannot name any resource, so it is
/// answered with 404 like an unknown id.
pub struct ResourceId<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ResourceId<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(rejection = %rejection.body_text(), "unparsable resource id");
                AppError::EntityNotFound("Not found.".into())
            })?;
        Ok(Self(value))
    }
}

/// Query string whose rejections carry the usual `{"detail"}` body.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidField(rejection.body_text()))?;
        Ok(Self(value))
    }
}

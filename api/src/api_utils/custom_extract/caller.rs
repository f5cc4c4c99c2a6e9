use axum::extract::{FromRequestParts, MatchedPath};
use axum::http::request::Parts;
use axum::{async_trait, http::StatusCode, RequestPartsExt};

use abi::errors::Error;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user behind the request. Authentication happens upstream,
/// the gateway forwards the resolved id in `x-user-id`.
pub struct Caller(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Error);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .extract::<MatchedPath>()
            .await
            .map(|path| path.as_str().to_owned())
            .unwrap_or_default();

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match user_id {
            Some(user_id) => Ok(Self(user_id.to_string())),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Error::unauthorized_with_details(format!(
                    "missing {USER_ID_HEADER} header on {path}"
                )),
            )),
        }
    }
}

use axum::extract::State;
use axum::Json;

use abi::errors::Error;
use abi::types::{SelfSummary, UserIdsBody, UserSummary};

use crate::api_utils::custom_extract::{Caller, JsonExtractor, PathExtractor};
use crate::AppState;

/// the caller with friends, requests and chats resolved
pub async fn get_self(
    State(app_state): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<SelfSummary>, Error> {
    let me = app_state.relation.get_self(&user_id).await?;
    Ok(Json(me))
}

pub async fn list_users(
    State(app_state): State<AppState>,
    Caller(_): Caller,
) -> Result<Json<Vec<UserSummary>>, Error> {
    let users = app_state.relation.list_users().await?;
    Ok(Json(users))
}

pub async fn get_users_by_ids(
    State(app_state): State<AppState>,
    Caller(_): Caller,
    JsonExtractor(body): JsonExtractor<UserIdsBody>,
) -> Result<Json<Vec<UserSummary>>, Error> {
    let users = app_state.relation.get_users_by_ids(&body.user_ids).await?;
    Ok(Json(users))
}

/// find a user by handle (with or without the leading `@`) or by email
pub async fn lookup_user(
    State(app_state): State<AppState>,
    Caller(_): Caller,
    PathExtractor(key): PathExtractor<String>,
) -> Result<Json<UserSummary>, Error> {
    let user = app_state.relation.lookup_user(&key).await?;
    Ok(Json(user))
}

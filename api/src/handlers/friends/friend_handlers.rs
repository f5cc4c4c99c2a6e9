use axum::extract::State;
use axum::Json;
use tracing::debug;

use abi::errors::Error;
use abi::types::{AcceptOutcome, FriendRequestBody, SendOutcome, UserSummary};

use crate::api_utils::custom_extract::{Caller, JsonExtractor};
use crate::AppState;

/// send a friend request, completes the friendship if the other side asked first
pub async fn send_friend_request(
    State(app_state): State<AppState>,
    Caller(user_id): Caller,
    JsonExtractor(body): JsonExtractor<FriendRequestBody>,
) -> Result<Json<SendOutcome>, Error> {
    debug!("{user_id} sends friend request to {}", body.friend_id);
    let outcome = app_state
        .relation
        .send_friend_request(&user_id, &body.friend_id)
        .await?;
    Ok(Json(outcome))
}

pub async fn accept_friend_request(
    State(app_state): State<AppState>,
    Caller(user_id): Caller,
    JsonExtractor(body): JsonExtractor<FriendRequestBody>,
) -> Result<Json<AcceptOutcome>, Error> {
    let outcome = app_state
        .relation
        .accept_friend_request(&user_id, &body.friend_id)
        .await?;
    Ok(Json(outcome))
}

/// users waiting for the caller's answer
pub async fn list_friend_requests(
    State(app_state): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<Vec<UserSummary>>, Error> {
    let list = app_state.relation.list_friend_requests(&user_id).await?;
    Ok(Json(list))
}

use axum::extract::State;
use axum::Json;

use abi::errors::Error;
use abi::types::{DeleteOutcome, NotificationSummary};

use crate::api_utils::custom_extract::{Caller, PathExtractor};
use crate::AppState;

pub async fn list_notifications(
    State(app_state): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<Vec<NotificationSummary>>, Error> {
    let feed = app_state.relation.list_notifications(&user_id).await?;
    Ok(Json(feed.iter().collect()))
}

pub async fn delete_notification(
    State(app_state): State<AppState>,
    Caller(user_id): Caller,
    PathExtractor(notification_id): PathExtractor<String>,
) -> Result<Json<DeleteOutcome>, Error> {
    let outcome = app_state
        .relation
        .delete_notification(&user_id, &notification_id)
        .await?;
    Ok(Json(outcome))
}

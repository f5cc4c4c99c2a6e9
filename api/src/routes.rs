use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::friends::{accept_friend_request, list_friend_requests, send_friend_request};
use crate::handlers::notifications::{delete_notification, list_notifications};
use crate::handlers::users::{get_self, get_users_by_ids, list_users, lookup_user};
use crate::AppState;

pub(crate) fn app_routes(state: AppState) -> Router {
    Router::new()
        .nest("/user", user_routes(state.clone()))
        .nest("/friend", friend_routes(state.clone()))
        .nest("/notification", notification_routes(state))
}

fn friend_routes(state: AppState) -> Router {
    Router::new()
        .route("/request", post(send_friend_request))
        .route("/accept", put(accept_friend_request))
        .route("/requests", get(list_friend_requests))
        .with_state(state)
}

fn notification_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:id", delete(delete_notification))
        .with_state(state)
}

fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/self", get(get_self))
        .route("/batch", post(get_users_by_ids))
        .route("/lookup/:key", get(lookup_user))
        .with_state(state)
}

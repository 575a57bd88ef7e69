use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::bot::Reply;
use crate::server::AppState;
use crate::server::dto::{LeaderboardEntry, ShopItem, UpdateRequest};
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};

/// Runs a blocking closure against the shared state off the async executor.
async fn blocking<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(state.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!("Command task panicked: {}", e);
            ApiError::internal("Command task failed")
        })?
}

pub async fn post_update(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRequest>,
) -> impl IntoResponse {
    let inbound = req.inbound().map_err(ApiError::bad_request)?;
    let user_id = req.user_id;

    let reply: Reply = blocking(state, move |s| Ok(s.dispatcher.handle(user_id, &inbound))).await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(reply)))
}

pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let players = blocking(state, |s| {
        s.dispatcher
            .engine()
            .leaderboard()
            .api_err("Failed to load leaderboard")
    })
    .await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(LeaderboardEntry::ranked(
        players,
    ))))
}

pub async fn get_shop(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let buildings = blocking(state, |s| {
        s.dispatcher
            .engine()
            .list_shop()
            .api_err("Failed to load shop")
    })
    .await?;

    let items: Vec<ShopItem> = buildings.into_iter().map(ShopItem::from).collect();
    Ok::<_, ApiError>(Json(ApiResponse::success(items)))
}

// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the FrogCrypto JSON API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use frogcrypto_core::types::{Credential, FeedDefinition, IssuedReward, Item, Score, UserState};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Body of requests that only carry a credential.
#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    #[serde(default)]
    pub credential: Option<Credential>,
}

/// Body of `POST /frogcrypto/admin/items`.
#[derive(Debug, Deserialize)]
pub struct UpsertItemsRequest {
    #[serde(default)]
    pub credential: Option<Credential>,
    pub items: Vec<Item>,
}

/// Body of `POST /frogcrypto/admin/items/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteItemsRequest {
    #[serde(default)]
    pub credential: Option<Credential>,
    pub item_ids: Vec<i64>,
}

/// Body of `POST /frogcrypto/admin/feeds`.
#[derive(Debug, Deserialize)]
pub struct UpsertFeedsRequest {
    #[serde(default)]
    pub credential: Option<Credential>,
    pub feeds: Vec<FeedDefinition>,
}

#[derive(Debug, Serialize)]
pub struct FeedsResponse {
    pub feeds: Vec<FeedDefinition>,
}

#[derive(Debug, Serialize)]
pub struct PollResponse {
    pub reward: IssuedReward,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct ScoreboardResponse {
    pub scores: Vec<Score>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /frogcrypto/feeds
pub async fn list_feeds(State(state): State<GatewayState>) -> Json<FeedsResponse> {
    Json(FeedsResponse {
        feeds: state.service.list_feeds(),
    })
}

/// GET /frogcrypto/feeds/{feed_id}
///
/// Zero or one feeds; private feeds are returned too.
pub async fn get_feed(
    State(state): State<GatewayState>,
    Path(feed_id): Path<String>,
) -> Json<FeedsResponse> {
    Json(FeedsResponse {
        feeds: state.service.list_single_feed(&feed_id),
    })
}

/// POST /frogcrypto/feeds/{feed_id}/poll
pub async fn poll_feed(
    State(state): State<GatewayState>,
    Path(feed_id): Path<String>,
    payload: Result<Json<CredentialRequest>, JsonRejection>,
) -> Result<Json<PollResponse>, ApiError> {
    let Json(body) = payload?;
    let reward = state
        .service
        .poll_feed(&feed_id, body.credential.as_ref())
        .await?;
    Ok(Json(PollResponse { reward }))
}

/// POST /frogcrypto/user-state
pub async fn user_state(
    State(state): State<GatewayState>,
    payload: Result<Json<CredentialRequest>, JsonRejection>,
) -> Result<Json<UserState>, ApiError> {
    let Json(body) = payload?;
    let user_state = state
        .service
        .get_user_state(body.credential.as_ref())
        .await?;
    Ok(Json(user_state))
}

/// POST /frogcrypto/admin/items
pub async fn upsert_items(
    State(state): State<GatewayState>,
    payload: Result<Json<UpsertItemsRequest>, JsonRejection>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let Json(body) = payload?;
    let items = state
        .service
        .upsert_items(body.credential.as_ref(), &body.items)
        .await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /frogcrypto/admin/items/delete
pub async fn delete_items(
    State(state): State<GatewayState>,
    payload: Result<Json<DeleteItemsRequest>, JsonRejection>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let Json(body) = payload?;
    let items = state
        .service
        .delete_items(body.credential.as_ref(), &body.item_ids)
        .await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /frogcrypto/admin/feeds
pub async fn upsert_feeds(
    State(state): State<GatewayState>,
    payload: Result<Json<UpsertFeedsRequest>, JsonRejection>,
) -> Result<Json<FeedsResponse>, ApiError> {
    let Json(body) = payload?;
    let feeds = state
        .service
        .upsert_feeds(body.credential.as_ref(), &body.feeds)
        .await?;
    Ok(Json(FeedsResponse { feeds }))
}

/// GET /frogcrypto/scoreboard
pub async fn scoreboard(
    State(state): State<GatewayState>,
) -> Result<Json<ScoreboardResponse>, ApiError> {
    let scores = state.service.scoreboard().await?;
    Ok(Json(ScoreboardResponse { scores }))
}

/// GET /health
pub async fn health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

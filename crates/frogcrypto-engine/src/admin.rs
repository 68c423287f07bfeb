// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin mutations of items and feeds.
//!
//! Every operation requires a credential whose identity is on the admin
//! allow-list. Payloads are validated in full before anything is written.

use std::collections::HashSet;
use std::str::FromStr;

use tracing::info;

use frogcrypto_core::types::{
    AttributeRange, Biome, Credential, FeedDefinition, Item, Rarity, Temperament, UserId,
};
use frogcrypto_core::FrogError;

use crate::service::FrogCryptoService;

impl FrogCryptoService {
    /// Insert or replace items; returns every item in id order.
    pub async fn upsert_items(
        &self,
        credential: Option<&Credential>,
        items: &[Item],
    ) -> Result<Vec<Item>, FrogError> {
        let result = async {
            let admin = self.authorize_admin(credential).await?;
            validate_items(items)?;
            self.storage.upsert_items(items).await?;
            info!(admin = %admin, count = items.len(), "items upserted");
            self.storage.list_items().await
        }
        .await;
        self.observe("upsert items", result)
    }

    /// Delete items by id; returns the remaining items in id order.
    pub async fn delete_items(
        &self,
        credential: Option<&Credential>,
        item_ids: &[i64],
    ) -> Result<Vec<Item>, FrogError> {
        let result = async {
            let admin = self.authorize_admin(credential).await?;
            self.storage.delete_items(item_ids).await?;
            info!(admin = %admin, count = item_ids.len(), "items deleted");
            self.storage.list_items().await
        }
        .await;
        self.observe("delete items", result)
    }

    /// Insert or replace feeds and refresh the feed cache before returning
    /// every stored feed definition.
    pub async fn upsert_feeds(
        &self,
        credential: Option<&Credential>,
        feeds: &[FeedDefinition],
    ) -> Result<Vec<FeedDefinition>, FrogError> {
        let result = async {
            let admin = self.authorize_admin(credential).await?;
            validate_feeds(feeds)?;
            self.storage.upsert_feeds(feeds).await?;
            self.feeds.refresh().await?;
            info!(admin = %admin, count = feeds.len(), "feeds upserted");
            self.storage.list_feeds().await
        }
        .await;
        self.observe("upsert feeds", result)
    }

    async fn authorize_admin(&self, credential: Option<&Credential>) -> Result<UserId, FrogError> {
        let user = self.authenticate(credential).await?;
        if self
            .settings
            .admin_identities
            .contains(&user.as_str().to_ascii_lowercase())
        {
            Ok(user)
        } else {
            Err(FrogError::Forbidden(
                "identity is not an administrator".to_string(),
            ))
        }
    }
}

fn bad_request(message: String) -> FrogError {
    FrogError::BadRequest(message)
}

fn check_weight(what: &str, weight: f64) -> Result<(), FrogError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(bad_request(format!(
            "{what} must be a non-negative number, got {weight}"
        )))
    }
}

fn check_range(item_id: i64, attribute: &str, range: AttributeRange) -> Result<(), FrogError> {
    if range.min <= range.max {
        Ok(())
    } else {
        Err(bad_request(format!(
            "item {item_id}: {attribute} min {} exceeds max {}",
            range.min, range.max
        )))
    }
}

/// Reject item payloads that could not be synthesized into rewards.
pub fn validate_items(items: &[Item]) -> Result<(), FrogError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id) {
            return Err(bad_request(format!("duplicate item id {}", item.id)));
        }
        if item.uuid.trim().is_empty() {
            return Err(bad_request(format!("item {}: uuid is empty", item.id)));
        }
        if item.name.trim().is_empty() {
            return Err(bad_request(format!("item {}: name is empty", item.id)));
        }
        if Biome::from_str(&item.biome).is_err() {
            return Err(bad_request(format!(
                "item {}: unknown biome `{}`",
                item.id, item.biome
            )));
        }
        if Rarity::from_str(&item.rarity).is_err() {
            return Err(bad_request(format!(
                "item {}: unknown rarity `{}`",
                item.id, item.rarity
            )));
        }
        check_weight(&format!("item {} drop_weight", item.id), item.drop_weight)?;
        for (code, weight) in &item.temperament_weights {
            if Temperament::from_str(code).is_err() {
                return Err(bad_request(format!(
                    "item {}: unknown temperament `{code}`",
                    item.id
                )));
            }
            check_weight(&format!("item {} temperament {code}", item.id), *weight)?;
        }
        check_range(item.id, "jump", item.jump)?;
        check_range(item.id, "speed", item.speed)?;
        check_range(item.id, "intelligence", item.intelligence)?;
        check_range(item.id, "beauty", item.beauty)?;
    }
    Ok(())
}

/// Reject feed payloads with empty ids, negative cooldowns, or bad scalers.
pub fn validate_feeds(feeds: &[FeedDefinition]) -> Result<(), FrogError> {
    let mut seen = HashSet::new();
    for feed in feeds {
        if feed.id.trim().is_empty() {
            return Err(bad_request("feed id is empty".to_string()));
        }
        if !seen.insert(feed.id.as_str()) {
            return Err(bad_request(format!("duplicate feed id `{}`", feed.id)));
        }
        if feed.cooldown_secs < 0 {
            return Err(bad_request(format!(
                "feed `{}`: cooldown_secs must be >= 0",
                feed.id
            )));
        }
        for (biome, weight) in &feed.categories {
            check_weight(
                &format!("feed `{}` {biome} drop_weight_scaler", feed.id),
                weight.drop_weight_scaler,
            )?;
        }
    }
    Ok(())
}

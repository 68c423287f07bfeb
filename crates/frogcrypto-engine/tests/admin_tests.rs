// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for admin mutations and feed listings.

use frogcrypto_core::FrogError;
use frogcrypto_core::types::{AttributeRange, Biome};
use frogcrypto_test_utils::{TestHarness, feed, item};

#[tokio::test]
async fn non_admin_is_forbidden_and_nothing_is_written() {
    let h = TestHarness::builder().build().await.unwrap();
    let user = h.user();

    let err = h
        .service
        .upsert_items(Some(&h.credential(&user)), &[item(1, Biome::Jungle, 1.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, FrogError::Forbidden(_)));

    let err = h
        .service
        .upsert_feeds(Some(&h.credential(&user)), &[feed("jungle", &[Biome::Jungle], 60)])
        .await
        .unwrap_err();
    assert!(matches!(err, FrogError::Forbidden(_)));

    let err = h.service.delete_items(None, &[1]).await.unwrap_err();
    assert!(matches!(err, FrogError::Authentication(_)));

    assert!(h.storage.list_items().await.unwrap().is_empty());
    assert!(h.storage.list_feeds().await.unwrap().is_empty());
}

#[tokio::test]
async fn item_upsert_and_delete_return_all_items() {
    let h = TestHarness::builder().build().await.unwrap();
    let admin = h.admin_credential();

    let items = h
        .service
        .upsert_items(
            Some(&admin),
            &[item(3, Biome::Desert, 1.0), item(1, Biome::Jungle, 2.0)],
        )
        .await
        .unwrap();
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);

    let mut renamed = item(3, Biome::Desert, 1.0);
    renamed.name = "Sand Frog".to_string();
    let items = h
        .service
        .upsert_items(Some(&admin), &[renamed])
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "Sand Frog");

    let items = h
        .service
        .delete_items(Some(&admin), &[1, 42])
        .await
        .unwrap();
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3]);
}

#[tokio::test]
async fn invalid_items_are_rejected_as_a_whole() {
    let h = TestHarness::builder().build().await.unwrap();
    let mut bad = item(2, Biome::Jungle, 1.0);
    bad.jump = AttributeRange::new(10, 1);

    let err = h
        .service
        .upsert_items(
            Some(&h.admin_credential()),
            &[item(1, Biome::Jungle, 1.0), bad],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FrogError::BadRequest(_)));
    assert!(h.storage.list_items().await.unwrap().is_empty());
    assert_eq!(h.reporter.count(), 0);
}

#[tokio::test]
async fn feed_upsert_is_visible_to_the_next_poll() {
    let h = TestHarness::builder()
        .with_items(vec![item(1, Biome::Celestial, 1.0)])
        .build()
        .await
        .unwrap();
    let user = h.user();

    let err = h
        .service
        .poll_feed("sky", Some(&h.credential(&user)))
        .await
        .unwrap_err();
    assert!(matches!(err, FrogError::FeedNotFound { .. }));

    let feeds = h
        .service
        .upsert_feeds(
            Some(&h.admin_credential()),
            &[feed("sky", &[Biome::Celestial], 30)],
        )
        .await
        .unwrap();
    assert_eq!(feeds.len(), 1);

    let issued = h
        .service
        .poll_feed("sky", Some(&h.credential(&user)))
        .await
        .unwrap();
    assert_eq!(issued.reward.biome, Biome::Celestial);
}

#[tokio::test]
async fn feed_cooldown_change_applies_to_existing_state() {
    let h = TestHarness::builder()
        .with_items(vec![item(1, Biome::Jungle, 1.0)])
        .with_feeds(vec![feed("jungle", &[Biome::Jungle], 600)])
        .build()
        .await
        .unwrap();
    let user = h.user();
    h.service
        .poll_feed("jungle", Some(&h.credential(&user)))
        .await
        .unwrap();

    h.service
        .upsert_feeds(
            Some(&h.admin_credential()),
            &[feed("jungle", &[Biome::Jungle], 5)],
        )
        .await
        .unwrap();
    h.clock.advance_secs(5);
    h.service
        .poll_feed("jungle", Some(&h.credential(&user)))
        .await
        .unwrap();
}

#[tokio::test]
async fn private_feeds_are_hidden_from_listing_only() {
    let mut hidden = feed("hidden", &[Biome::TheWrithingVoid], 60);
    hidden.private = true;
    let h = TestHarness::builder()
        .with_items(vec![item(1, Biome::TheWrithingVoid, 1.0)])
        .with_feeds(vec![
            feed("b-open", &[Biome::Jungle], 60),
            hidden,
            feed("a-open", &[Biome::Jungle], 60),
        ])
        .build()
        .await
        .unwrap();

    let listed: Vec<String> = h.service.list_feeds().into_iter().map(|f| f.id).collect();
    assert_eq!(listed, vec!["a-open", "b-open"]);

    let single = h.service.list_single_feed("hidden");
    assert_eq!(single.len(), 1);
    assert!(single[0].private);
    assert!(h.service.list_single_feed("missing").is_empty());

    h.service
        .poll_feed("hidden", Some(&h.credential(&h.user())))
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_feed_payload_leaves_cache_untouched() {
    let h = TestHarness::builder()
        .with_feeds(vec![feed("jungle", &[Biome::Jungle], 60)])
        .build()
        .await
        .unwrap();
    let mut bad = feed("desert", &[Biome::Desert], 60);
    bad.cooldown_secs = -1;

    let err = h
        .service
        .upsert_feeds(Some(&h.admin_credential()), &[bad])
        .await
        .unwrap_err();
    assert!(matches!(err, FrogError::BadRequest(_)));
    assert!(!h.service.feeds().has_feed("desert"));
    assert_eq!(h.storage.list_feeds().await.unwrap().len(), 1);
}

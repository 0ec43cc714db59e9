//! Tests for the ReplyCache implementation.

use retort_cache::{ReplyCache, ReplyCacheConfig};
use retort_core::{ChatMessage, Role, conversation};
use std::time::Duration;

fn sample_messages(opponent: &str, intensity: u8) -> Vec<ChatMessage> {
    conversation(opponent, intensity)
}

#[test]
fn test_cache_put_and_get() {
    let mut cache = ReplyCache::new(ReplyCacheConfig::default());

    let fp = ReplyCache::fingerprint(&sample_messages("你根本不懂", 8), 8);
    cache.put(fp.clone(), "1. 回复一\n2. 回复二\n3. 回复三");

    let entry = cache.get(&fp);
    assert!(entry.is_some());
    assert_eq!(entry.unwrap().text(), "1. 回复一\n2. 回复二\n3. 回复三");

    // Unknown fingerprint reports absent.
    assert!(cache.get("deadbeef").is_none());
}

#[test]
fn test_cache_expiration_purges_entry() {
    let config = ReplyCacheConfig::default().with_ttl(Duration::from_millis(50));
    let mut cache = ReplyCache::new(config);

    let fp = ReplyCache::fingerprint(&sample_messages("你根本不懂", 5), 5);
    cache.put(fp.clone(), "回复");
    assert!(cache.get(&fp).is_some());

    std::thread::sleep(Duration::from_millis(80));

    // Expired entry is treated as absent and purged on lookup.
    assert!(cache.get(&fp).is_none());
    assert_eq!(cache.len(), 0);

    // A repeated lookup still reports absent.
    assert!(cache.get(&fp).is_none());
}

#[test]
fn test_cache_update_existing_fingerprint() {
    let mut cache = ReplyCache::new(ReplyCacheConfig::default());

    let fp = ReplyCache::fingerprint(&sample_messages("是吗", 3), 3);
    cache.put(fp.clone(), "first");
    assert_eq!(cache.get(&fp).unwrap().text(), "first");

    cache.put(fp.clone(), "second");
    assert_eq!(cache.get(&fp).unwrap().text(), "second");
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_cleanup_expired_entries() {
    let config = ReplyCacheConfig::default().with_ttl(Duration::from_millis(50));
    let mut cache = ReplyCache::new(config);

    cache.put("a", "one");
    cache.put("b", "two");
    assert_eq!(cache.len(), 2);

    std::thread::sleep(Duration::from_millis(80));

    let removed = cache.cleanup_expired();
    assert_eq!(removed, 2);
    assert!(cache.is_empty());
}

#[test]
fn test_cache_clear() {
    let mut cache = ReplyCache::new(ReplyCacheConfig::default());
    cache.put("a", "one");
    cache.put("b", "two");

    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get("a").is_none());
}

#[test]
fn test_fingerprint_deterministic_for_equal_requests() {
    for intensity in 1..=10 {
        let left = ReplyCache::fingerprint(&sample_messages("你说什么", intensity), intensity);
        let right = ReplyCache::fingerprint(&sample_messages("你说什么", intensity), intensity);
        assert_eq!(left, right);
    }
}

#[test]
fn test_fingerprint_differs_across_corpus() {
    let opponents = ["你根本不懂", "你说什么", "是吗", "呵呵", "就这？"];
    let mut seen = std::collections::HashSet::new();

    for opponent in opponents {
        for intensity in 1..=10 {
            let fp = ReplyCache::fingerprint(&sample_messages(opponent, intensity), intensity);
            assert!(seen.insert(fp), "fingerprint collision in corpus");
        }
    }
}

#[test]
fn test_fingerprint_sensitive_to_role_and_content() {
    let base = vec![
        ChatMessage::new(Role::System, "prompt"),
        ChatMessage::new(Role::User, "对方的话：你好"),
    ];
    let swapped_role = vec![
        ChatMessage::new(Role::User, "prompt"),
        ChatMessage::new(Role::User, "对方的话：你好"),
    ];
    let changed_content = vec![
        ChatMessage::new(Role::System, "prompt"),
        ChatMessage::new(Role::User, "对方的话：你好吗"),
    ];

    let fp = ReplyCache::fingerprint(&base, 5);
    assert_ne!(fp, ReplyCache::fingerprint(&swapped_role, 5));
    assert_ne!(fp, ReplyCache::fingerprint(&changed_content, 5));
    assert_ne!(fp, ReplyCache::fingerprint(&base, 6));
}

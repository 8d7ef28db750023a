use crate::cache::CacheManager;
use crate::config::CacheConfig;
use tempfile::TempDir;

fn cache_in(dir: &TempDir) -> CacheManager {
    CacheManager::new(CacheConfig {
        enabled: true,
        cache_dir: dir.path().join("cache"),
        expire_hours: 1,
    })
}

#[test]
fn test_hash_prompt_stable() {
    let temp_dir = TempDir::new().unwrap();
    let cache = cache_in(&temp_dir);

    let a = cache.hash_prompt("hello");
    let b = cache.hash_prompt("hello");
    let c = cache.hash_prompt("world");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 32); // md5 hex
}

#[tokio::test]
async fn test_store_then_get() {
    let temp_dir = TempDir::new().unwrap();
    let cache = cache_in(&temp_dir);

    cache
        .store("router", "prompt-a", &"decision".to_string())
        .await
        .unwrap();

    let hit: Option<String> = cache.get("router", "prompt-a").await;
    assert_eq!(hit, Some("decision".to_string()));

    // 不同prompt不命中
    let miss: Option<String> = cache.get("router", "prompt-b").await;
    assert!(miss.is_none());

    // 不同category不命中
    let miss: Option<String> = cache.get("planner", "prompt-a").await;
    assert!(miss.is_none());
}

#[tokio::test]
async fn test_disabled_cache_is_passthrough() {
    let temp_dir = TempDir::new().unwrap();
    let cache = CacheManager::new(CacheConfig {
        enabled: false,
        cache_dir: temp_dir.path().join("cache"),
        expire_hours: 1,
    });

    cache
        .store("router", "prompt", &"value".to_string())
        .await
        .unwrap();
    let hit: Option<String> = cache.get("router", "prompt").await;
    assert!(hit.is_none());
    assert!(!temp_dir.path().join("cache").exists());
}

#[tokio::test]
async fn test_clear_removes_entries() {
    let temp_dir = TempDir::new().unwrap();
    let cache = cache_in(&temp_dir);

    cache
        .store("router", "prompt", &"value".to_string())
        .await
        .unwrap();
    cache.clear().await.unwrap();

    let hit: Option<String> = cache.get("router", "prompt").await;
    assert!(hit.is_none());
}

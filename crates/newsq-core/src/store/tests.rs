//! Tests for the store (in-memory and on-disk).

use super::Store;

#[tokio::test]
async fn get_missing_key_is_none() {
    let store = Store::open_in_memory().await.unwrap();
    let v: Option<Vec<String>> = store.get("nothing").await.unwrap();
    assert!(v.is_none());
}

#[tokio::test]
async fn set_get_overwrite_remove() {
    let store = Store::open_in_memory().await.unwrap();
    store.set("recents", &vec!["us", "jp"]).await.unwrap();
    let v: Vec<String> = store.get("recents").await.unwrap().unwrap();
    assert_eq!(v, ["us", "jp"]);

    store.set("recents", &vec!["fr"]).await.unwrap();
    let v: Vec<String> = store.get("recents").await.unwrap().unwrap();
    assert_eq!(v, ["fr"]);

    assert!(store.remove("recents").await.unwrap());
    assert!(!store.remove("recents").await.unwrap());
    let v: Option<Vec<String>> = store.get("recents").await.unwrap();
    assert!(v.is_none());
}

#[tokio::test]
async fn undecodable_value_reads_as_none() {
    let store = Store::open_in_memory().await.unwrap();
    store.set("flag", &true).await.unwrap();
    let v: Option<Vec<String>> = store.get("flag").await.unwrap();
    assert!(v.is_none());
}

#[tokio::test]
async fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested dir").join("newsq.db");
    {
        let store = Store::open_at(&path).await.unwrap();
        store.set("k", &42u32).await.unwrap();
    }
    let store = Store::open_at(&path).await.unwrap();
    let v: Option<u32> = store.get("k").await.unwrap();
    assert_eq!(v, Some(42));
}

#[tokio::test]
async fn update_starts_from_default_and_returns_closure_result() {
    let store = Store::open_in_memory().await.unwrap();
    let len = store
        .update("list", |v: &mut Vec<u32>| {
            v.push(1);
            v.len()
        })
        .await
        .unwrap();
    assert_eq!(len, 1);
    let v: Vec<u32> = store.get("list").await.unwrap().unwrap();
    assert_eq!(v, [1]);
}

#[tokio::test]
async fn concurrent_updates_on_disk_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open_at(dir.path().join("newsq.db")).await.unwrap();
    for i in 0..20u32 {
        let (a, b) = tokio::join!(
            store.update("n", |v: &mut Vec<u32>| v.push(2 * i)),
            store.update("n", |v: &mut Vec<u32>| v.push(2 * i + 1)),
        );
        a.unwrap();
        b.unwrap();
    }
    let v: Vec<u32> = store.get("n").await.unwrap().unwrap();
    assert_eq!(v.len(), 40);
}

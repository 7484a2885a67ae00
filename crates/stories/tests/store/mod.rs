use futures::future::join_all;

use super::*;

mod http;

#[traced_test]
#[tokio::test]
async fn test_concurrent_loads_share_one_fetch() {
  let store = ArticleStore::new(SlowSource::serving(DATASET), MemorySnapshot::new());

  let results = join_all((0..5).map(|_| store.load())).await;

  assert_eq!(store.last_outcome(), Some(LoadOutcome::Fetched { count: 2 }));
  let first = &results[0];
  assert!(results.iter().all(|collection| Arc::ptr_eq(first, collection)));
  assert!(Arc::ptr_eq(first, &store.collection()));
}

#[traced_test]
#[tokio::test]
async fn test_concurrent_failed_loads_share_one_attempt() {
  let source = Arc::new(SlowSource::failing());
  let store = ArticleStore::new(Arc::clone(&source), MemorySnapshot::new());

  let (a, b) = tokio::join!(store.load(), store.load());
  assert!(a.is_empty() && b.is_empty());
  assert_eq!(source.calls(), 1);
  assert_eq!(store.last_outcome(), Some(LoadOutcome::Empty));

  // A later load, after the shared attempt, gets a fresh try.
  store.load().await;
  assert_eq!(source.calls(), 2);
  assert!(logs_contain("Failed to fetch articles from slow test source"));
}

#[traced_test]
#[tokio::test]
async fn test_loaded_collection_is_reused_without_io() {
  let source = Arc::new(SlowSource::serving(DATASET));
  let store = ArticleStore::new(Arc::clone(&source), MemorySnapshot::new());

  let first = store.load().await;
  let second = store.load().await;
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(source.calls(), 1);
}

#[traced_test]
#[tokio::test]
async fn test_failed_fetch_recovers_snapshot() {
  let snapshot = Arc::new(MemorySnapshot::new());

  let online = ArticleStore::new(InlineSource::from_json(DATASET).unwrap(), Arc::clone(&snapshot));
  let fresh = online.load().await;
  assert!(snapshot.document().is_some());

  let offline = ArticleStore::new(SlowSource::failing(), Arc::clone(&snapshot));
  let recovered = offline.load().await;
  assert_eq!(offline.last_outcome(), Some(LoadOutcome::Recovered { count: 2 }));
  assert_eq!(*recovered, *fresh);
  assert_eq!(recovered.ids().collect::<Vec<_>>(), vec!["quiet-rooms", "salt-roads"]);
  assert_eq!(
    offline.get("quiet-rooms").unwrap().img_src,
    "https://source.unsplash.com/Ab3dE5gH7jK/1600x900"
  );
}

#[traced_test]
#[tokio::test]
async fn test_failed_fetch_without_snapshot_is_empty() {
  let store = ArticleStore::new(SlowSource::failing(), MemorySnapshot::new());
  let collection = store.load().await;

  assert!(collection.is_empty());
  assert!(store.get("quiet-rooms").is_none());
  assert_eq!(store.last_outcome(), Some(LoadOutcome::Empty));
}

#[traced_test]
#[tokio::test]
async fn test_get_before_load() {
  let store = ArticleStore::new(SlowSource::serving(DATASET), MemorySnapshot::new());
  assert!(store.get("quiet-rooms").is_none());
  assert!(store.collection().is_empty());
  assert_eq!(store.last_outcome(), None);

  store.load().await;
  assert_eq!(store.get("quiet-rooms").unwrap().title, "Quiet Rooms");
  assert!(store.get("missing").is_none());
}

#[traced_test]
#[tokio::test]
async fn test_grid_follows_collection_order() {
  let store = ArticleStore::new(InlineSource::from_json(DATASET).unwrap(), MemorySnapshot::new());
  let mut cards = Vec::new();
  store.render_grid(&mut cards);
  assert!(cards.is_empty());

  store.load().await;
  store.render_grid(&mut cards);
  store.render_grid(&mut cards);
  assert_eq!(cards.len(), 2);
  assert_eq!(cards[0].href, "#quiet-rooms");
  assert_eq!(cards[0].img_src, "https://source.unsplash.com/Ab3dE5gH7jK/1600x900");
  assert_eq!(cards[1].excerpt, "");
}

#[traced_test]
#[tokio::test]
async fn test_file_snapshot_survives_restart() -> TestResult<()> {
  let dir = tempdir()?;

  let online = ArticleStore::new(InlineSource::from_json(DATASET)?, FileSnapshot::new(dir.path()));
  online.load().await;
  assert!(dir.path().join("ds-articles-v1.json").exists());

  let offline = ArticleStore::new(SlowSource::failing(), FileSnapshot::new(dir.path()));
  assert_eq!(offline.load().await.len(), 2);
  assert!(offline.last_outcome().unwrap().is_stale());

  offline.snapshot().clear()?;
  assert!(offline.snapshot().read()?.is_none());
  Ok(())
}

use super::*;

#[traced_test]
#[tokio::test]
async fn test_http_source_bypasses_caches() -> TestResult<()> {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(GET).path("/data/articles.json").header("cache-control", "no-cache");
      then.status(200).header("content-type", "application/json").body(DATASET);
    })
    .await;

  let source = HttpSource::new(&server.url("/data/articles.json"))?;
  let collection = source.fetch().await?;

  mock.assert_async().await;
  assert_eq!(collection.len(), 2);
  // Sources hand out raw data; normalizing is the store's job.
  assert_eq!(
    collection.get("quiet-rooms").unwrap().img_src,
    "https://unsplash.com/photos/reading-room-Ab3dE5gH7jK"
  );
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_http_source_rejects_error_status() -> TestResult<()> {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/data/articles.json");
      then.status(500);
    })
    .await;

  let source = HttpSource::new(&server.url("/data/articles.json"))?;
  assert!(matches!(source.fetch().await, Err(StoriesError::Status(500))));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_http_source_rejects_non_object_document() -> TestResult<()> {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/data/articles.json");
      then.status(200).header("content-type", "application/json").body(r#"[{"title": "x"}]"#);
    })
    .await;

  let source = HttpSource::new(&server.url("/data/articles.json"))?;
  assert!(matches!(source.fetch().await, Err(StoriesError::Json(_))));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_store_over_http_falls_back_to_snapshot() -> TestResult<()> {
  let dir = tempdir()?;
  let server = MockServer::start_async().await;
  let mut ok = server
    .mock_async(|when, then| {
      when.method(GET).path("/data/articles.json");
      then.status(200).body(DATASET);
    })
    .await;

  let url = server.url("/data/articles.json");
  let first = ArticleStore::new(HttpSource::new(&url)?, FileSnapshot::new(dir.path()));
  first.load().await;
  assert_eq!(first.last_outcome(), Some(LoadOutcome::Fetched { count: 2 }));

  ok.delete_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/data/articles.json");
      then.status(502);
    })
    .await;

  let second = ArticleStore::new(
    HttpSource::new(&url)?.with_timeout(Duration::from_secs(2))?,
    FileSnapshot::new(dir.path()),
  );
  second.load().await;
  assert_eq!(second.last_outcome(), Some(LoadOutcome::Recovered { count: 2 }));
  assert_eq!(second.get("salt-roads").unwrap().meta, "By Teo · 4 min read");
  assert!(logs_contain("Failed to fetch articles"));
  Ok(())
}

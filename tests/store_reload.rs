mod support;

use case_catalog::{CatalogLoadError, CatalogStore, FileSource, SourceError, StaticSource};
use std::fs;
use std::sync::Arc;
use support::{settle_until, study, GatedSource, ScriptedSource};
use tempfile::tempdir;

#[tokio::test]
async fn failed_reload_keeps_previous_records() {
    let store = CatalogStore::new();
    let source = ScriptedSource::with_responses(vec![
        Ok(support::ten_records()),
        Err(SourceError::Unavailable("cms is down".into())),
    ]);

    store.load(&source).await.unwrap();
    assert_eq!(store.snapshot().len(), 10);

    let err = store.load(&source).await.unwrap_err();
    assert!(matches!(err, CatalogLoadError::Source(SourceError::Unavailable(_))));
    assert_eq!(store.snapshot().len(), 10);
    assert_eq!(store.snapshot().revision(), 1);
    assert!(!store.is_loading());
    assert_eq!(source.calls().await, 2);

    // Lookups still answer from the kept snapshot.
    assert_eq!(store.case_study_by_slug("acme-co-2").await.map(|e| e.id()), Some(6));
}

#[tokio::test]
async fn loading_transitions_reach_existing_subscribers() {
    let store = CatalogStore::new();
    let mut first = store.subscribe_loading();
    let mut second = store.subscribe_loading();
    let source = ScriptedSource::with_responses(vec![
        Ok(vec![study(1, "Acme Co", "Retail")]),
        Err(SourceError::Unavailable("boom".into())),
    ]);

    store.load(&source).await.unwrap();
    let _ = store.load(&source).await;

    for watch in [&mut first, &mut second] {
        assert_eq!(watch.next().await, Some(true));
        assert_eq!(watch.next().await, Some(false));
        assert_eq!(watch.next().await, Some(true));
        assert_eq!(watch.next().await, Some(false));
        assert!(!watch.current());
    }
}

#[tokio::test]
async fn subscriber_far_behind_still_sees_every_transition() {
    let store = CatalogStore::new();
    let mut watch = store.subscribe_loading();
    let source = StaticSource::new(support::ten_records());

    for _ in 0..50 {
        store.load(&source).await.unwrap();
    }
    assert_eq!(store.snapshot().revision(), 50);

    for round in 0..50 {
        assert_eq!(watch.next().await, Some(true), "raise of load {round}");
        assert_eq!(watch.next().await, Some(false), "clear of load {round}");
    }
    assert!(!watch.current());
}

#[tokio::test]
async fn loading_is_raised_while_fetch_is_pending() {
    let store = Arc::new(CatalogStore::new());
    let (source, gate) = GatedSource::new(vec![study(1, "Acme Co", "Retail")]);

    let loader = {
        let store = store.clone();
        tokio::spawn(async move { store.load(&source).await })
    };
    settle_until(|| store.is_loading()).await.unwrap();
    assert!(store.snapshot().is_empty());

    gate.notify_one();
    loader.await.unwrap().unwrap();
    assert!(!store.is_loading());
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn concurrent_loads_do_not_interleave() {
    let store = Arc::new(CatalogStore::new());
    let (slow, gate) = GatedSource::new(vec![study(1, "First", "")]);
    let fast = ScriptedSource::with_responses(vec![Ok(vec![study(2, "Second", ""), study(3, "Third", "")])]);

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.load(&slow).await })
    };
    settle_until(|| store.is_loading()).await.unwrap();

    let second = {
        let store = store.clone();
        let fast = fast.clone();
        tokio::spawn(async move { store.load(&fast).await })
    };
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
    // The second load is parked behind the first and has not fetched yet.
    assert_eq!(fast.calls().await, 0);
    assert_eq!(store.snapshot().revision(), 0);

    gate.notify_one();
    let a = first.await.unwrap().unwrap();
    let b = second.await.unwrap().unwrap();
    assert_eq!(a.revision(), 1);
    assert_eq!(b.revision(), 2);
    let ids: Vec<_> = store.snapshot().entries().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![2, 3]);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn readers_wait_for_in_flight_load() {
    let store = Arc::new(CatalogStore::new());
    let (source, gate) = GatedSource::new(vec![study(1, "Acme Co", "Retail")]);
    let loader = {
        let store = store.clone();
        tokio::spawn(async move { store.load(&source).await })
    };
    settle_until(|| store.is_loading()).await.unwrap();

    let reader = {
        let store = store.clone();
        tokio::spawn(async move { store.case_study_by_slug("acme-co").await })
    };
    gate.notify_one();
    loader.await.unwrap().unwrap();
    let found = reader.await.unwrap();
    assert_eq!(found.map(|e| e.id()), Some(1));
}

#[tokio::test]
async fn file_source_reload_picks_up_changes() {
    let td = tempdir().unwrap();
    let path = td.path().join("case-studies.json");
    fs::write(&path, r#"[{"id": 1, "name": "Acme Co", "industry": "Retail"}]"#).unwrap();

    let store = CatalogStore::new();
    let source = FileSource::new(&path).unwrap();
    assert_eq!(source.path(), path.as_path());
    store.load(&source).await.unwrap();
    assert_eq!(store.snapshot().len(), 1);

    fs::write(
        &path,
        r#"{"caseStudies": [{"id": 1, "name": "Acme Co"}, {"id": 2, "name": "Acme Co!"}]}"#,
    )
    .unwrap();
    store.load(&source).await.unwrap();
    assert_eq!(store.snapshot().by_slug("acme-co-2").map(|e| e.id()), Some(2));

    fs::write(&path, "not json").unwrap();
    assert!(store.load(&source).await.is_err());
    assert_eq!(store.snapshot().len(), 2);
    assert!(!store.is_loading());
}

use std::sync::Arc;
use std::time::Duration;

use endpoint_kit::upsert::FixedClock;
use endpoint_kit::{
    DocumentStore, FailureKind, InMemoryDocumentStore, InvalidRequest, UpsertEngine,
    UpsertOutcome, UpsertRequest, MAX_ID_LEN,
};
use serde_json::json;

use crate::support::{object, InstrumentedStore};

const T: i64 = 1_700_000_000_000;

fn engine_over(store: Arc<InstrumentedStore>) -> UpsertEngine<Arc<InstrumentedStore>> {
    UpsertEngine::with_clock(store, Arc::new(FixedClock(T)))
}

#[tokio::test]
async fn scenario_create_then_update() {
    let engine = UpsertEngine::with_clock(InMemoryDocumentStore::new(), Arc::new(FixedClock(T)));

    let created = engine
        .upsert(UpsertRequest::create(object(json!({ "name": "x" }))))
        .await
        .unwrap();
    assert!(matches!(created, UpsertOutcome::Created(_)));
    assert_eq!(
        created.document().unwrap().clone().into_value(),
        json!({ "id": "auto1", "createdAt": T, "name": "x" })
    );

    let updated = engine
        .upsert(UpsertRequest::update("auto1", object(json!({ "name": "y" }))))
        .await
        .unwrap();
    assert!(matches!(updated, UpsertOutcome::Updated(_)));
    assert_eq!(
        updated.document().unwrap().clone().into_value(),
        json!({ "id": "auto1", "createdAt": T, "name": "y" })
    );
}

#[tokio::test]
async fn creation_is_never_deduplicated() {
    let store = Arc::new(InstrumentedStore::new());
    let engine = engine_over(store.clone());
    let payload = object(json!({ "name": "same", "n": 1 }));

    let first = engine.upsert(UpsertRequest::create(payload.clone())).await.unwrap();
    let second = engine.upsert(UpsertRequest::create(payload)).await.unwrap();

    let first = first.document().unwrap();
    let second = second.document().unwrap();
    assert_ne!(first.id(), second.id());
    for doc in [first, second] {
        assert_eq!(doc.get("name"), Some(&json!("same")));
        assert_eq!(doc.get("n"), Some(&json!(1)));
    }
    assert_eq!(store.finds(), 0);
    assert_eq!(store.writes(), 2);
}

#[tokio::test]
async fn identity_and_created_at_are_stable() {
    let store = InMemoryDocumentStore::new();
    let creator = UpsertEngine::with_clock(store.clone(), Arc::new(FixedClock(T)));
    let updater = UpsertEngine::with_clock(store, Arc::new(FixedClock(T + 60_000)));

    let created = creator
        .upsert(UpsertRequest::create(object(json!({ "a": 1, "b": 1 }))))
        .await
        .unwrap();
    let id = created.document().unwrap().id().unwrap().to_string();

    updater
        .upsert(UpsertRequest::update(&id, object(json!({ "b": 2 }))))
        .await
        .unwrap();
    let outcome = updater
        .upsert(UpsertRequest::update(&id, object(json!({ "c": 3 }))))
        .await
        .unwrap();

    let doc = outcome.document().unwrap();
    assert_eq!(doc.id(), Some(id.as_str()));
    assert_eq!(doc.created_at(), Some(T));
    assert_eq!(
        doc.clone().into_value(),
        json!({ "id": id, "createdAt": T, "a": 1, "b": 2, "c": 3 })
    );
}

#[tokio::test]
async fn merge_is_shallow_last_write_wins() {
    let engine = UpsertEngine::with_clock(InMemoryDocumentStore::new(), Arc::new(FixedClock(T)));
    engine
        .upsert(UpsertRequest::create(object(json!({ "a": 1, "b": 2 }))))
        .await
        .unwrap();

    let outcome = engine
        .upsert(UpsertRequest::update("auto1", object(json!({ "b": 3, "c": 4 }))))
        .await
        .unwrap();

    assert_eq!(
        outcome.document().unwrap().clone().into_value(),
        json!({ "id": "auto1", "createdAt": T, "a": 1, "b": 3, "c": 4 })
    );
}

#[tokio::test]
async fn missing_key_yields_not_found_without_writing() {
    let store = Arc::new(InstrumentedStore::new());
    let engine = engine_over(store.clone());

    let outcome = engine
        .upsert(UpsertRequest::update("nonexistent", object(json!({ "name": "p" }))))
        .await
        .unwrap();

    assert_eq!(outcome, UpsertOutcome::NotFound("nonexistent".into()));
    assert_eq!(store.finds(), 1);
    assert_eq!(store.writes(), 0);
    assert!(store.inner.is_empty());
}

#[tokio::test]
async fn lookup_failure_is_reported_not_thrown() {
    let store = Arc::new(InstrumentedStore::new().failing_find());
    let engine = engine_over(store.clone());

    let outcome = engine
        .upsert(UpsertRequest::update("auto1", object(json!({ "x": 1 }))))
        .await
        .unwrap();

    match outcome {
        UpsertOutcome::Failed { kind, detail } => {
            assert_eq!(kind, FailureKind::StoreUnavailable);
            assert!(detail.contains("connection refused"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn write_failure_is_reported_not_thrown() {
    let store = Arc::new(InstrumentedStore::new().failing_write());
    let engine = engine_over(store.clone());

    let outcome = engine
        .upsert(UpsertRequest::create(object(json!({ "x": 1 }))))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        UpsertOutcome::Failed { kind: FailureKind::WriteError, .. }
    ));
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn update_write_failure_is_write_error() {
    let healthy = InMemoryDocumentStore::new();
    UpsertEngine::new(healthy.clone())
        .upsert(UpsertRequest::create(object(json!({ "x": 1 }))))
        .await
        .unwrap();

    let store = Arc::new(InstrumentedStore::over(healthy).failing_write());
    let outcome = engine_over(store.clone())
        .upsert(UpsertRequest::update("auto1", object(json!({ "x": 2 }))))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        UpsertOutcome::Failed { kind: FailureKind::WriteError, .. }
    ));
    assert_eq!(store.finds(), 1);
    assert_eq!(
        store.inner.find("auto1").await.unwrap().unwrap().get("x"),
        Some(&json!(1))
    );
}

#[tokio::test]
async fn malformed_key_touches_nothing() {
    let store = Arc::new(InstrumentedStore::new());
    let engine = engine_over(store.clone());

    let err = engine
        .upsert(UpsertRequest::update("", object(json!({}))))
        .await
        .unwrap_err();

    assert_eq!(err, InvalidRequest::MalformedKey(String::new()));
    assert_eq!(store.finds(), 0);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn overlong_key_touches_nothing() {
    let store = Arc::new(InstrumentedStore::new());
    let engine = engine_over(store.clone());

    let longest = "k".repeat(MAX_ID_LEN);
    let outcome = engine
        .upsert(UpsertRequest::update(&longest, object(json!({}))))
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::NotFound(longest));

    let overlong = "k".repeat(MAX_ID_LEN + 1);
    let err = engine
        .upsert(UpsertRequest::update(&overlong, object(json!({}))))
        .await
        .unwrap_err();
    assert_eq!(err, InvalidRequest::MalformedKey(overlong));
    assert_eq!(store.finds(), 1);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn engine_does_not_serialize_same_key() {
    let store = Arc::new(InstrumentedStore::new().slow_find(Duration::from_millis(30)));
    let engine = Arc::new(engine_over(store.clone()));
    engine
        .upsert(UpsertRequest::create(object(json!({}))))
        .await
        .unwrap();

    let a = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .upsert(UpsertRequest::update("auto1", object(json!({ "a": 1 }))))
                .await
        })
    };
    let b = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .upsert(UpsertRequest::update("auto1", object(json!({ "b": 1 }))))
                .await
        })
    };
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // Both read the same snapshot; the later write wins and drops a field.
    let stored = store.inner.find("auto1").await.unwrap().unwrap();
    let has_a = stored.get("a").is_some();
    let has_b = stored.get("b").is_some();
    assert!(has_a ^ has_b);
}

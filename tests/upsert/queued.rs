use std::sync::Arc;
use std::time::Duration;

use endpoint_kit::{
    DocumentStore, QueuedUpsertEngine, UpsertEngine, UpsertOutcome, UpsertRequest,
};
use serde_json::json;

use crate::support::{object, InstrumentedStore};

fn queued(store: Arc<InstrumentedStore>) -> Arc<QueuedUpsertEngine<Arc<InstrumentedStore>>> {
    Arc::new(QueuedUpsertEngine::new(UpsertEngine::new(store)))
}

async fn seed(engine: &QueuedUpsertEngine<Arc<InstrumentedStore>>, count: usize) {
    for _ in 0..count {
        engine
            .upsert(UpsertRequest::create(object(json!({}))))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn same_key_updates_are_serialized() {
    let store = Arc::new(InstrumentedStore::new().slow_find(Duration::from_millis(20)));
    let engine = queued(store.clone());
    seed(&engine, 1).await;

    let handles: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|field| {
            let engine = engine.clone();
            tokio::spawn(async move {
                let mut payload = serde_json::Map::new();
                payload.insert(field.to_string(), json!(true));
                engine.upsert(UpsertRequest::update("auto1", payload)).await
            })
        })
        .collect();
    for handle in handles {
        assert!(matches!(
            handle.await.unwrap().unwrap(),
            UpsertOutcome::Updated(_)
        ));
    }

    let stored = store.inner.find("auto1").await.unwrap().unwrap();
    for field in ["a", "b", "c"] {
        assert_eq!(stored.get(field), Some(&json!(true)), "lost field {}", field);
    }
}

#[tokio::test]
async fn distinct_keys_are_independent() {
    let store = Arc::new(InstrumentedStore::new().slow_find(Duration::from_millis(20)));
    let engine = queued(store.clone());
    seed(&engine, 2).await;

    let first = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .upsert(UpsertRequest::update("auto1", object(json!({ "v": 1 }))))
                .await
        })
    };
    let second = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .upsert(UpsertRequest::update("auto2", object(json!({ "v": 2 }))))
                .await
        })
    };

    assert!(matches!(first.await.unwrap().unwrap(), UpsertOutcome::Updated(_)));
    assert!(matches!(second.await.unwrap().unwrap(), UpsertOutcome::Updated(_)));
    assert_eq!(store.finds(), 2);
    assert_eq!(store.writes(), 4);
}

#[tokio::test]
async fn queued_missing_key_is_still_not_found() {
    let store = Arc::new(InstrumentedStore::new());
    let engine = queued(store.clone());

    let outcome = engine
        .upsert(UpsertRequest::update("ghost", object(json!({ "x": 1 }))))
        .await
        .unwrap();

    assert_eq!(outcome, UpsertOutcome::NotFound("ghost".into()));
    assert_eq!(store.writes(), 0);
}

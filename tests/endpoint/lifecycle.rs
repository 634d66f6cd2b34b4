use std::sync::{Arc, Mutex};

use endpoint_kit::{Context, Endpoint, EndpointConfig, FunctionError, Host};
use serde_json::{json, Value};

fn recorder() -> (Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (log.clone(), log)
}

#[tokio::test]
async fn hooks_run_in_order_with_cause() {
    let (log, seen) = recorder();
    let start_log = log.clone();
    let mut config = EndpointConfig::default();
    config.name = "orders".into();

    let endpoint = Endpoint::new(Host::in_memory(config))
        .on_start(move |host: &Host| {
            start_log.lock().unwrap().push(format!("start {}", host.name()));
        })
        .on_stop(move |_host: &Host, cause: &str| {
            log.lock().unwrap().push(format!("stop {}", cause));
        });

    endpoint.start();
    endpoint.stop("deploy");

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["start orders".to_string(), "stop deploy".to_string()]
    );
}

#[tokio::test]
async fn custom_functions_reach_settings() {
    let mut config = EndpointConfig::default();
    config.settings.insert("greeting".into(), json!("hi"));

    let endpoint = Endpoint::new(Host::in_memory(config)).function("greet", |ctx: Context| async move {
        let greeting = ctx.setting("greeting").cloned().unwrap_or(Value::Null);
        Ok::<_, FunctionError>(json!({ "greeting": greeting, "name": ctx.raw_params()["name"] }))
    });

    let result = endpoint
        .dispatch("greet", None, json!({ "name": "Pat" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "greeting": "hi", "name": "Pat" }));
}

#[tokio::test]
async fn guard_runs_before_handler() {
    let (log, seen) = recorder();
    let endpoint = Endpoint::new(Host::in_memory(EndpointConfig::default())).function_guarded(
        "needsName",
        |ctx: &Context| ctx.has_field("name"),
        move |_ctx: Context| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push("ran".into());
                Ok::<_, FunctionError>(json!({}))
            }
        },
    );

    let err = endpoint
        .dispatch("needsName", None, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, FunctionError::GuardRejected(_)));
    assert!(seen.lock().unwrap().is_empty());

    endpoint
        .dispatch("needsName", None, json!({ "name": "x" }))
        .await
        .unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

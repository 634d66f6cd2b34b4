use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

/// Error type for script execution requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("script rejected: {0}")]
    Rejected(String),
}

/// Schedules application scripts. Execution happens in a separate job;
/// `execute` returns as soon as the job is accepted.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn execute(&self, script_name: &str, parameters: Value) -> Result<Value, ScriptError>;
}

/// A script job accepted by `InMemoryScriptRunner`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptJob {
    pub job_id: String,
    pub script_name: String,
    pub parameters: Value,
}

/// Records jobs instead of running them.
#[derive(Clone, Default)]
pub struct InMemoryScriptRunner {
    jobs: Arc<Mutex<Vec<ScriptJob>>>,
}

impl InMemoryScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> Vec<ScriptJob> {
        self.jobs.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ScriptRunner for InMemoryScriptRunner {
    async fn execute(&self, script_name: &str, parameters: Value) -> Result<Value, ScriptError> {
        if script_name.trim().is_empty() {
            return Err(ScriptError::Rejected("script name is empty".into()));
        }
        let job = ScriptJob {
            job_id: uuid::Uuid::new_v4().to_string(),
            script_name: script_name.to_string(),
            parameters,
        };
        let response = json!({ "jobId": job.job_id, "status": "pending" });
        self.jobs
            .lock()
            .map_err(|_| ScriptError::Rejected("job queue poisoned".into()))?
            .push(job);
        Ok(response)
    }
}

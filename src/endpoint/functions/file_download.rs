//! Function: downloadFileFromEndpoint
//!
//! Starts a background download of a platform file and answers at once.
//! When the download completes the content is sent to the app as
//! `onDownloadComplete`, correlated with the request id. UTF-8 content is
//! sent as text, anything else as base64.

use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::endpoint::{Context, FunctionError};
use crate::logging::APP_TARGET;

pub const FUNCTION: &str = "downloadFileFromEndpoint";

pub const DOWNLOAD_COMPLETE_EVENT: &str = "onDownloadComplete";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
}

pub fn guard(ctx: &Context) -> bool {
    ctx.has_fields(&["id"])
}

pub async fn handle(ctx: Context) -> Result<Value, FunctionError> {
    let input = ctx.params::<Input>()?;
    let file_id = input.id;
    let host = ctx.host().clone();
    let correlation_id = ctx.request_id().map(str::to_string);

    let task_file_id = file_id.clone();
    tokio::spawn(async move {
        match host.files().download(&task_file_id).await {
            Ok(content) => {
                tracing::info!(file_id = %task_file_id, bytes = content.len(), "file download has completed");
                host.events().send(
                    DOWNLOAD_COMPLETE_EVENT,
                    content_payload(&task_file_id, content),
                    correlation_id,
                );
            }
            Err(e) => {
                tracing::error!(file_id = %task_file_id, error = %e, "file download failed");
                tracing::error!(target: APP_TARGET, file_id = %task_file_id, error = %e, "File download failed");
            }
        }
    });

    Ok(json!({ "msg": format!("File [{}] is being downloaded.", file_id) }))
}

/// Event payload for downloaded content.
pub fn content_payload(file_id: &str, content: Vec<u8>) -> Value {
    match String::from_utf8(content) {
        Ok(text) => json!({ "fileId": file_id, "encoding": "utf8", "content": text }),
        Err(e) => json!({
            "fileId": file_id,
            "encoding": "base64",
            "content": base64::engine::general_purpose::STANDARD.encode(e.as_bytes()),
        }),
    }
}

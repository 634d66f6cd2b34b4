//! Function: uploadFileFromEndpoint
//!
//! In the background: fetch `upload.source_url`, store it as
//! `upload.file_name`, then send the stored file's info to the app as
//! `onUploadComplete`, correlated with the request id. Answers at once.

use serde_json::{json, Value};

use crate::endpoint::{Context, FunctionError};
use crate::logging::APP_TARGET;

pub const FUNCTION: &str = "uploadFileFromEndpoint";

pub const UPLOAD_COMPLETE_EVENT: &str = "onUploadComplete";

pub fn guard(_ctx: &Context) -> bool {
    true
}

pub async fn handle(ctx: Context) -> Result<Value, FunctionError> {
    let host = ctx.host().clone();
    let correlation_id = ctx.request_id().map(str::to_string);

    tokio::spawn(async move {
        let url = host.config().upload.source_url.clone();
        let response = match host.http().get(&url).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                tracing::error!(url = %url, status = response.status, "couldn't download the file");
                return;
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "couldn't download the file");
                return;
            }
        };

        let file_name = host.config().upload.file_name.clone();
        match host.files().upload(&file_name, response.body).await {
            Ok(info) => match serde_json::to_value(&info) {
                Ok(payload) => {
                    host.events().send(UPLOAD_COMPLETE_EVENT, payload, correlation_id);
                }
                Err(e) => tracing::error!(error = %e, "could not encode file info"),
            },
            Err(e) => {
                tracing::error!(file_name = %file_name, error = %e, "file upload failed");
                tracing::error!(target: APP_TARGET, file_name = %file_name, error = %e, "File upload failed");
            }
        }
    });

    Ok(json!({ "msg": "file is being downloaded" }))
}

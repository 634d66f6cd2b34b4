//! Function: findAndSaveDocument
//!
//! Parameters without an `id` create a document; parameters with an `id`
//! are merged into that document. A missing document is reported, never
//! created. The outcome is also sent to the app as an event correlated
//! with the request id.

use serde_json::{json, Value};

use crate::endpoint::{Context, FunctionError};
use crate::logging::APP_TARGET;
use crate::upsert::{FailureKind, UpsertOutcome, UpsertRequest};

pub const FUNCTION: &str = "findAndSaveDocument";

pub fn guard(ctx: &Context) -> bool {
    ctx.raw_params().is_object()
}

pub async fn handle(ctx: Context) -> Result<Value, FunctionError> {
    let request = UpsertRequest::from_params(ctx.raw_params().clone())?;
    let outcome = ctx.host().upserts().upsert(request).await?;

    ctx.host()
        .events()
        .notify_outcome(&outcome, ctx.request_id().map(str::to_string));

    match outcome {
        UpsertOutcome::Created(document) => {
            tracing::info!(target: APP_TARGET, id = document.id().unwrap_or("-"), "Document saved successfully");
            Ok(json!({ "msg": "ok", "status": "created", "document": document }))
        }
        UpsertOutcome::Updated(document) => {
            tracing::info!(target: APP_TARGET, id = document.id().unwrap_or("-"), "Document updated successfully");
            Ok(json!({ "msg": "ok", "status": "updated", "document": document }))
        }
        UpsertOutcome::NotFound(id) => {
            tracing::warn!(target: APP_TARGET, id = %id, "No document found");
            Err(FunctionError::NotFound(format!(
                "No document found with id [{}]",
                id
            )))
        }
        UpsertOutcome::Failed { kind, detail } => {
            tracing::error!(target: APP_TARGET, ?kind, detail = %detail, "error while saving the document");
            Err(match kind {
                FailureKind::StoreUnavailable => FunctionError::Unavailable(detail),
                FailureKind::WriteError => FunctionError::Failed(detail),
            })
        }
    }
}

//! Function: executeScript
//!
//! Hands a script to the platform. The script runs later in its own job.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::endpoint::{Context, FunctionError};

pub const FUNCTION: &str = "executeScript";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub script_name: String,
    #[serde(default)]
    pub parameters: Value,
}

pub fn guard(ctx: &Context) -> bool {
    ctx.has_fields(&["scriptName"])
}

pub async fn handle(ctx: Context) -> Result<Value, FunctionError> {
    let input = ctx.params::<Input>()?;

    let response = ctx
        .host()
        .scripts()
        .execute(&input.script_name, input.parameters)
        .await
        .map_err(|e| FunctionError::Failed(e.to_string()))?;

    Ok(json!({
        "msg": format!(
            "Script [{}] will be executed shortly in a separate job",
            input.script_name
        ),
        "response": response,
    }))
}

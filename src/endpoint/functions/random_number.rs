//! Function: randomNumber
//!
//! Returns `{ "number": n }` with `n = round(random() * max)`. `max` comes
//! from the parameters, or from `random.default_max` when absent, null,
//! zero, `false` or the empty string. Results outside the `i64` range are
//! returned as JSON floats.

use rand::Rng;
use serde_json::{json, Number, Value};

use crate::endpoint::{Context, FunctionError};
use crate::logging::APP_TARGET;

pub const FUNCTION: &str = "randomNumber";

/// 2^63, the first float past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

pub fn guard(ctx: &Context) -> bool {
    ctx.raw_params().is_object() || ctx.raw_params().is_null()
}

pub async fn handle(ctx: Context) -> Result<Value, FunctionError> {
    tracing::info!(target: APP_TARGET, params = %ctx.raw_params(), "Request to generate random number received");

    let default_max = ctx.host().config().random.default_max;
    let max = match ctx.raw_params().get("max") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => default_max,
        Some(Value::String(s)) if s.is_empty() => default_max,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(max) if max != 0.0 => max,
            _ => default_max,
        },
        Some(_) => {
            return Err(FunctionError::InvalidParams(
                "Parameter \"max\" is not a valid number".into(),
            ))
        }
    };

    let number = (rand::thread_rng().gen::<f64>() * max).round();
    tracing::info!(number, "random number generated");
    Ok(json!({ "number": to_json_number(number)? }))
}

/// An integral JSON number when `number` fits in `i64`, a float otherwise.
fn to_json_number(number: f64) -> Result<Value, FunctionError> {
    if (-I64_BOUND..I64_BOUND).contains(&number) {
        return Ok(json!(number as i64));
    }
    Number::from_f64(number)
        .map(Value::Number)
        .ok_or_else(|| FunctionError::Failed(format!("{} is not a JSON number", number)))
}

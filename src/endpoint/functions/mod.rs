//! Sample functions.
//!
//! Each module follows the handler convention:
//! - `FUNCTION`: the function name it responds to
//! - `guard`: parameter validation
//! - `handle`: the async function itself

pub mod execute_script;
pub mod fail;
pub mod file_download;
pub mod file_upload;
pub mod find_and_save_document;
pub mod ping;
pub mod random_number;

use super::Endpoint;

/// Event the default webhook forwards bodies as.
pub const INBOUND_EVENT: &str = "inboundEvent";

/// Register every sample function and the default webhook.
pub fn register_samples(endpoint: Endpoint) -> Endpoint {
    let webhook_path = endpoint.host().config().server.webhook_path.clone();
    crate::register_functions!(
        endpoint,
        random_number,
        find_and_save_document,
        ping,
        fail,
        file_download,
        file_upload,
        execute_script,
    )
    .webhook(&webhook_path, INBOUND_EVENT)
}

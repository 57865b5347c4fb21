use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GREETING: &str = "Hello, World!";

/// http-shaped response understood by function urls and api gateway
/// proxy integrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

/// the body is the json encoding of the greeting, quotes included.
pub fn respond() -> Response {
    Response {
        status_code: 200,
        body: Value::String(GREETING.to_string()).to_string(),
    }
}

pub async fn handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    tracing::debug!(request_id = %event.context.request_id, "handling request");
    Ok(respond())
}

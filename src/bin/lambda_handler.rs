//! AWS Lambda handler for collection option comparisons
//!
//! Accepts the scenario inputs as the event itself (direct invocation) or as
//! the JSON `body` of a Lambda Function URL request, and returns the
//! comparison report. Missing inputs take the calculator defaults.
//!
//! Rejected input never surfaces as a runtime error: direct invocations get
//! an `{"error": ...}` object back, Function URL requests a 400 response.

use credit_collection::{evaluate, ComparisonReport, ScenarioError, ScenarioInputs};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use serde_json::{json, Value};

/// The parts of a Function URL request this handler reads
#[derive(Debug, Deserialize)]
struct FunctionUrlRequest {
    /// Kept as a raw value so a non-string body can be rejected with a 400
    #[serde(default)]
    body: Option<Value>,
    #[serde(default, rename = "isBase64Encoded")]
    is_base64_encoded: bool,
}

/// Where the event came from decides the shape of the response
enum Invocation {
    Direct(Value),
    FunctionUrl(FunctionUrlRequest),
}

impl Invocation {
    fn from_event(payload: Value) -> Result<Self, serde_json::Error> {
        if payload.get("requestContext").is_some() || payload.get("body").is_some() {
            Ok(Invocation::FunctionUrl(serde_json::from_value(payload)?))
        } else {
            Ok(Invocation::Direct(payload))
        }
    }
}

fn parse_inputs(body: Option<&str>) -> Result<ScenarioInputs, ScenarioError> {
    match body.map(str::trim) {
        None | Some("") => Ok(ScenarioInputs::default()),
        Some(json) => ScenarioInputs::from_json_str(json),
    }
}

fn report_value(inputs: &ScenarioInputs) -> Result<Value, ScenarioError> {
    let comparison = evaluate(inputs)?;
    Ok(serde_json::to_value(ComparisonReport::new(&comparison))?)
}

fn error_body(message: impl std::fmt::Display) -> Value {
    log::warn!("Rejected request: {}", message);
    json!({ "error": message.to_string() })
}

fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string(),
    })
}

fn handle_function_url(request: &FunctionUrlRequest) -> Value {
    if request.is_base64_encoded {
        return json_response(400, &error_body("Base64 encoded bodies are not supported"));
    }

    let body = match &request.body {
        None | Some(Value::Null) => None,
        Some(Value::String(body)) => Some(body.as_str()),
        Some(_) => return json_response(400, &error_body("Request body must be a JSON string")),
    };

    match parse_inputs(body).and_then(|inputs| report_value(&inputs)) {
        Ok(report) => json_response(200, &report),
        Err(e) => json_response(400, &error_body(e)),
    }
}

fn handle_direct(payload: Value) -> Value {
    let result = serde_json::from_value::<ScenarioInputs>(payload)
        .map_err(ScenarioError::from)
        .and_then(|inputs| report_value(&inputs));

    match result {
        Ok(report) => report,
        Err(e) => error_body(e),
    }
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let response = match Invocation::from_event(event.payload) {
        Ok(Invocation::FunctionUrl(request)) => handle_function_url(&request),
        Ok(Invocation::Direct(payload)) => handle_direct(payload),
        Err(e) => json_response(400, &error_body(format!("Malformed request: {}", e))),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

//! JSON-RPC 2.0 server mode for calckit
//!
//! Lets pages and launchers use calckit as a calculation backend.
//! Reads one JSON-RPC request per stdin line, writes one response per stdout line.

use calckit_core::calculators::gst::{DEFAULT_GST_RATE, GST_RATES};
use calckit_core::{Engine, Request, UnitCategory, CALCULATORS};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};

/// JSON-RPC 2.0 request
#[derive(Deserialize)]
struct RpcRequest {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Option<serde_json::Value>,
    id: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
    id: serde_json::Value,
}

/// JSON-RPC error object
#[derive(Serialize)]
struct RpcError {
    code: i32,
    message: String,
}

/// Params for units method
#[derive(Deserialize, Default)]
struct UnitsParams {
    #[serde(default)]
    category: Option<String>,
}

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

impl RpcResponse {
    fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            result: Some(result),
            error: None,
            id,
        }
    }

    fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }

    fn serialized(id: serde_json::Value, result: impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, INTERNAL_ERROR, format!("Serialization failed: {e}")),
        }
    }
}

/// Handle a single JSON-RPC request
fn handle_request(engine: &Engine, input: &str) -> RpcResponse {
    let request: RpcRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable request");
            return RpcResponse::error(
                serde_json::Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            );
        }
    };

    if request.jsonrpc != "2.0" {
        tracing::warn!(version = %request.jsonrpc, "unsupported JSON-RPC version");
        return RpcResponse::error(request.id, INVALID_REQUEST, "Invalid JSON-RPC version");
    }

    tracing::debug!(method = %request.method, id = %request.id, "request");

    match request.method.as_str() {
        "calculate" => handle_calculate(engine, request.id, request.params),
        "calculators" => RpcResponse::serialized(request.id, CALCULATORS),
        "units" => handle_units(request.id, request.params),
        "gst_rates" => handle_gst_rates(request.id),
        _ => {
            tracing::warn!(method = %request.method, "unknown method");
            RpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )
        }
    }
}

/// Handle calculate method - params are a calculator request object
fn handle_calculate(
    engine: &Engine,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> RpcResponse {
    let request: Request = match params {
        Some(p) => match serde_json::from_value(p) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "invalid calculate params");
                return RpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}"));
            }
        },
        None => return RpcResponse::error(id, INVALID_PARAMS, "Missing params"),
    };

    let outcome = engine.evaluate(&request);
    tracing::debug!(
        calculator = request.name(),
        ready = outcome.is_ready(),
        failed = outcome.is_error(),
        "calculated"
    );
    RpcResponse::serialized(id, &outcome)
}

/// Handle units method - list units, optionally of one category
fn handle_units(id: serde_json::Value, params: Option<serde_json::Value>) -> RpcResponse {
    let params: UnitsParams = match params {
        Some(p) => match serde_json::from_value(p) {
            Ok(p) => p,
            Err(e) => {
                return RpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}"))
            }
        },
        None => UnitsParams::default(),
    };

    let categories = match params.category.as_deref() {
        Some(name) => match UnitCategory::parse(name) {
            Some(category) => vec![category],
            None => {
                return RpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Unknown unit category: {name}"),
                )
            }
        },
        None => UnitCategory::all().to_vec(),
    };

    let listing: Vec<serde_json::Value> = categories
        .into_iter()
        .map(|category| {
            let (from, to) = category.default_pair();
            serde_json::json!({
                "category": category,
                "default_from": from,
                "default_to": to,
                "units": category.units().map(crate::unit_json).collect::<Vec<_>>(),
            })
        })
        .collect();
    RpcResponse::success(id, serde_json::Value::Array(listing))
}

/// Handle gst_rates method - preset slabs and the default rate
fn handle_gst_rates(id: serde_json::Value) -> RpcResponse {
    let rates: Vec<serde_json::Value> = GST_RATES
        .iter()
        .map(|def| serde_json::json!({"rate": def.rate, "label": def.label}))
        .collect();
    RpcResponse::success(
        id,
        serde_json::json!({"rates": rates, "default": DEFAULT_GST_RATE}),
    )
}

/// Run the JSON-RPC server loop
pub fn run_server(engine: &Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let response = handle_request(engine, &line);
        let json = serde_json::to_string(&response)?;
        writeln!(stdout, "{json}")?;
        stdout.flush()?;
    }

    tracing::debug!("stdin closed, server stopping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(request: serde_json::Value) -> serde_json::Value {
        let engine = Engine::new();
        let response = handle_request(&engine, &request.to_string());
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_calculate() {
        let response = call(json!({
            "jsonrpc": "2.0",
            "method": "calculate",
            "params": {"calculator": "percent_change", "from": "100", "to": "120"},
            "id": 1
        }));
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["status"], "ready");
        assert_eq!(response["result"]["result"]["direction"], "increase");
    }

    #[test]
    fn test_error_codes() {
        let engine = Engine::new();
        let parse = serde_json::to_value(handle_request(&engine, "{not json")).unwrap();
        assert_eq!(parse["error"]["code"], PARSE_ERROR);

        let version = call(json!({"jsonrpc": "1.0", "method": "calculate", "id": 2}));
        assert_eq!(version["error"]["code"], INVALID_REQUEST);

        let method = call(json!({"jsonrpc": "2.0", "method": "eval", "id": 3}));
        assert_eq!(method["error"]["code"], METHOD_NOT_FOUND);

        let params = call(json!({
            "jsonrpc": "2.0",
            "method": "calculate",
            "params": {"calculator": "tip"},
            "id": 4
        }));
        assert_eq!(params["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_units_of_category() {
        let response = call(json!({
            "jsonrpc": "2.0",
            "method": "units",
            "params": {"category": "volume"},
            "id": 5
        }));
        let listing = response["result"].as_array().unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0]["default_from"], "liter");
        assert_eq!(listing[0]["units"][3]["label"], "Cups");
    }
}

//! API Server Module
//!
//! This module implements a JSON-RPC server that runs the asserter over
//! request and response bodies posted to it. Every well-formed call gets a
//! verdict back; only malformed calls produce JSON-RPC errors.

use super::Verdict;
use crate::{
    asserter::Asserter,
    config::Config,
    endpoint::{self, Endpoint},
};
use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared application state that is accessible across all request handlers
///
/// The asserter is immutable once built, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    asserter: Arc<Asserter>,
}

/// The main API server struct
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Creates a new API server instance
    ///
    /// # Arguments
    /// * `config` - Server configuration (host, port, etc.)
    /// * `asserter` - The asserter every call is validated with
    pub fn new(config: Config, asserter: Arc<Asserter>) -> Self {
        Self {
            config,
            state: AppState { asserter },
        }
    }

    /// Builds the router with a single POST endpoint at "/" without binding
    /// to a socket.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", post(handle_rpc))
            .with_state(self.state.clone())
    }

    /// Starts the API server and begins listening for incoming requests
    ///
    /// # Returns
    /// `Ok(())` once the server shuts down, or an error if binding fails
    pub async fn start(self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Value,
    id: Value,
}

/// JSON-RPC 2.0 response structure
///
/// Either `result` or `error` will be populated, but not both.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Value,
}

/// JSON-RPC error object
///
/// - `code`: -32601 for method not found, -32602 for invalid params
/// - `message`: Human-readable error description
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn result(id: Value, result: Value) -> Json<Self> {
        Json(Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        })
    }

    fn error(id: Value, code: i32, message: String) -> Json<Self> {
        Json(Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError { code, message }),
            id,
        })
    }
}

/// Parameters of `validateRequest` and `validateResponse`.
///
/// `request` is only read by `validateResponse`, where it supplies the
/// request the response answers.
#[derive(Debug, Deserialize)]
struct ValidateParams {
    endpoint: String,
    #[serde(default)]
    body: Value,
    #[serde(default)]
    request: Option<Value>,
}

/// Main RPC request handler
///
/// Routes the request to the appropriate handler based on the method name.
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    info!("Received RPC request: {}", request.method);

    match request.method.as_str() {
        "validateRequest" => handle_validate_request(state, request).await,
        "validateResponse" => handle_validate_response(state, request).await,
        "listEndpoints" => handle_list_endpoints(request).await,
        _ => JsonRpcResponse::error(request.id, -32601, "Method not found".to_string()),
    }
}

/// Handles the "validateRequest" RPC method
async fn handle_validate_request(
    state: AppState,
    request: JsonRpcRequest,
) -> Json<JsonRpcResponse> {
    let (params, endpoint) = match parse_params(request.params) {
        Ok(parsed) => parsed,
        Err(message) => return JsonRpcResponse::error(request.id, -32602, message),
    };

    let verdict = match endpoint::check_request(Some(&*state.asserter), endpoint, params.body) {
        Ok(_) => {
            info!("Request to {} accepted", endpoint.path());
            Verdict::Accepted
        }
        Err(err) => {
            warn!("Request to {} rejected: {}", endpoint.path(), err);
            Verdict::from(err)
        }
    };

    respond(request.id, verdict)
}

/// Handles the "validateResponse" RPC method
async fn handle_validate_response(
    state: AppState,
    request: JsonRpcRequest,
) -> Json<JsonRpcResponse> {
    let (params, endpoint) = match parse_params(request.params) {
        Ok(parsed) => parsed,
        Err(message) => return JsonRpcResponse::error(request.id, -32602, message),
    };

    let verdict = match endpoint::check_response(
        Some(&*state.asserter),
        endpoint,
        params.body,
        params.request,
    ) {
        Ok(_) => {
            info!("Response from {} accepted", endpoint.path());
            Verdict::Accepted
        }
        Err(err) => {
            warn!("Response from {} rejected: {}", endpoint.path(), err);
            Verdict::from(err)
        }
    };

    respond(request.id, verdict)
}

/// Handles the "listEndpoints" RPC method
async fn handle_list_endpoints(request: JsonRpcRequest) -> Json<JsonRpcResponse> {
    let paths: Vec<&str> = Endpoint::ALL.iter().map(|endpoint| endpoint.path()).collect();
    JsonRpcResponse::result(request.id, Value::from(paths))
}

fn parse_params(params: Value) -> Result<(ValidateParams, Endpoint), String> {
    let params: ValidateParams =
        serde_json::from_value(params).map_err(|e| format!("Invalid params: {}", e))?;

    let endpoint = Endpoint::from_path(&params.endpoint)
        .ok_or_else(|| format!("Invalid params: unknown endpoint {}", params.endpoint))?;

    Ok((params, endpoint))
}

fn respond(id: Value, verdict: Verdict) -> Json<JsonRpcResponse> {
    match serde_json::to_value(&verdict) {
        Ok(result) => JsonRpcResponse::result(id, result),
        Err(e) => {
            error!("Failed to serialize verdict: {}", e);
            JsonRpcResponse::error(id, -32603, "Internal error".to_string())
        }
    }
}

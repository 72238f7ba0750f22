//! JSON-RPC 2.0 Protocol for the editor bridge
//!
//! One request or response per line on stdin/stdout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::IndexError;

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Request {
    pub fn new(id: u64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: RequestId::Number(id),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: RequestId, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Request ID
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

/// JSON-RPC Error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const UNKNOWN_DOCUMENT: i32 = -32001;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn parse_error() -> Self {
        Self::new(Self::PARSE_ERROR, "Parse error")
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(Self::METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(msg: &str) -> Self {
        Self::new(Self::INVALID_PARAMS, format!("Invalid params: {}", msg))
    }

    pub fn internal_error(msg: &str) -> Self {
        Self::new(Self::INTERNAL_ERROR, format!("Internal error: {}", msg))
    }

    pub fn unknown_document(uri: &str) -> Self {
        Self::with_data(
            Self::UNKNOWN_DOCUMENT,
            format!("Document not open: {}", uri),
            serde_json::json!({ "uri": uri }),
        )
    }
}

impl From<&IndexError> for RpcError {
    fn from(error: &IndexError) -> Self {
        Self::new(error.error_code(), error.to_string())
    }
}

impl From<IndexError> for RpcError {
    fn from(error: IndexError) -> Self {
        Self::from(&error)
    }
}

/// RPC method constants
pub mod methods {
    pub const PING: &str = "ping";
    pub const OPEN: &str = "open";
    pub const CHANGE: &str = "change";
    pub const CLOSE: &str = "close";
    pub const SYMBOLS: &str = "symbols";
    pub const RESOLVE: &str = "resolve";
    pub const SYNTHESIZE: &str = "synthesize";
    pub const KEYPRESS: &str = "keypress";
    pub const SHUTDOWN: &str = "shutdown";
}

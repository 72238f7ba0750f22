//! Bridge Server Implementation
//!
//! Reads newline-delimited JSON-RPC requests and answers each on its own
//! line. Requests are handled one at a time in arrival order.

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::bridge::handlers::{Workspace, parse_params};
use crate::bridge::protocol::{Request, RequestId, Response, RpcError, methods};
use crate::models::config::GhostConfig;

pub struct BridgeServer {
    workspace: Workspace,
}

impl BridgeServer {
    pub fn new(config: &GhostConfig) -> Self {
        Self {
            workspace: Workspace::new(config.synth.clone()),
        }
    }

    /// Serve on the process's stdin/stdout until EOF or `shutdown`
    pub async fn serve_stdio(&mut self) -> Result<(), std::io::Error> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run(stdin, stdout).await
    }

    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), std::io::Error>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("Bridge listening on stdio");
        let mut line = String::new();

        while reader.read_line(&mut line).await? > 0 {
            if line.trim().is_empty() {
                line.clear();
                continue;
            }

            let (response, should_shutdown) = self.handle_line(&line);
            let json = serde_json::to_string(&response).unwrap_or_else(|_| {
                r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Serialization error"}}"#.to_string()
            });

            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;

            if should_shutdown {
                tracing::info!("Shutdown requested");
                break;
            }
            line.clear();
        }

        Ok(())
    }

    /// Answer one request line. The flag is set for `shutdown`.
    pub fn handle_line(&mut self, json: &str) -> (Response, bool) {
        let request: Request = match serde_json::from_str(json) {
            Ok(r) => r,
            Err(_) => {
                return (
                    Response::error(RequestId::Number(0), RpcError::parse_error()),
                    false,
                );
            }
        };

        let id = request.id.clone();
        let is_shutdown = request.method == methods::SHUTDOWN;

        let response = match self.dispatch(request) {
            Ok(v) => Response::success(id, v),
            Err(e) => {
                tracing::debug!(code = e.code, "{}", e.message);
                Response::error(id, e)
            }
        };

        (response, is_shutdown)
    }

    fn dispatch(&mut self, request: Request) -> Result<Value, RpcError> {
        let params = request.params.unwrap_or(json!({}));
        let workspace = &mut self.workspace;

        match request.method.as_str() {
            // System
            methods::PING => Ok(json!({ "pong": true })),
            methods::SHUTDOWN => Ok(json!({ "shutting_down": true })),

            // Document lifecycle
            methods::OPEN => workspace.open(parse_params(params)?),
            methods::CHANGE => workspace.change(parse_params(params)?),
            methods::CLOSE => workspace.close(parse_params(params)?),

            // Queries
            methods::SYMBOLS => workspace.symbols(parse_params(params)?),
            methods::RESOLVE => workspace.resolve(parse_params(params)?),
            methods::SYNTHESIZE => workspace.synthesize(parse_params(params)?),
            methods::KEYPRESS => workspace.keypress(parse_params(params)?),

            other => Err(RpcError::method_not_found(other)),
        }
    }
}

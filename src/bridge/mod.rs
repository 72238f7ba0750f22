//! Editor Bridge Module
//!
//! `ghostlog serve` speaks line-delimited JSON-RPC 2.0 on stdio so an editor
//! plugin can keep buffers open and ask for log edits on a keypress.

mod handlers;
pub mod protocol;
pub mod server;

pub use protocol::{Request, RequestId, Response, RpcError};
pub use server::BridgeServer;

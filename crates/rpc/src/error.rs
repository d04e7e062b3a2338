//! Call-level error taxonomy.
//!
//! Every variant aborts exactly one call; the registry and all other
//! in-flight or future calls are unaffected.

use modlink_msgpack::MsgPackError;
use thiserror::Error;

/// Errors surfaced by dispatch and by the call client.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Dispatch received an operation name with no registered handler.
    #[error("no such operation: {0}")]
    UnknownOperation(String),

    /// An argument or result buffer could not be decoded.
    #[error("malformed arguments: {0}")]
    Malformed(#[from] MsgPackError),

    /// The handler itself failed.
    #[error("handler error: {0}")]
    Handler(String),

    /// The transport failed; surfaced unchanged, never retried.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RpcError {
    /// Shorthand for a handler-level failure.
    pub fn handler(message: impl Into<String>) -> Self {
        RpcError::Handler(message.into())
    }
}

/// Opaque failures from the call transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No implementation is bound under the given identifier.
    #[error("binding not found: {0}")]
    BindingNotFound(String),

    /// The transport reported a failure for this call.
    #[error("call failed: {0}")]
    Failed(String),
}

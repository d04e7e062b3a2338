//! Operation-name to handler routing on the serving side.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::RpcError;

/// A registered handler: raw argument buffer in, raw result buffer out.
///
/// Typed argument decoding and result encoding happen inside the wrapper
/// the schema layer registers, so the dispatcher itself stays
/// schema-agnostic.
pub type Handler = Box<dyn Fn(&[u8]) -> Result<Vec<u8>, RpcError> + Send + Sync>;

/// Routes inbound calls to handlers by operation name.
///
/// Built once during initialization and only read afterwards. Handlers
/// run to completion before the next call is dispatched; a failing call
/// never disturbs the registry or sibling calls.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Handler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an operation name to a handler.
    ///
    /// Idempotent per name: re-registering replaces the previous handler
    /// without error, since bindings may be rebuilt during initialization.
    pub fn register<F>(&mut self, operation: impl Into<String>, handler: F)
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, RpcError> + Send + Sync + 'static,
    {
        let operation = operation.into();
        debug!(operation = %operation, "handler registered");
        self.handlers.insert(operation, Box::new(handler));
    }

    /// Whether a handler is registered for the operation.
    pub fn contains(&self, operation: &str) -> bool {
        self.handlers.contains_key(operation)
    }

    /// Routes one inbound call.
    pub fn dispatch(&self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, RpcError> {
        let handler = self.handlers.get(operation).ok_or_else(|| {
            warn!(operation = %operation, "no handler for operation");
            RpcError::UnknownOperation(operation.to_string())
        })?;
        let result = handler(payload)?;
        debug!(operation = %operation, response_len = result.len(), "dispatched");
        Ok(result)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("operations", &self.handlers.len())
            .finish()
    }
}

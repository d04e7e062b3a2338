//! The call transport seam and the in-process loopback implementation.

use std::collections::HashMap;

use tracing::debug;

use crate::dispatcher::Dispatcher;
use crate::error::TransportError;

/// Moves one encoded call across the module boundary.
///
/// The caller addresses a host-side implementation by binding identifier,
/// groups the operation under a namespace string, and sends exactly one
/// binary buffer; the transport returns exactly one binary buffer or an
/// opaque failure. Blocking and synchronous from the caller's point of
/// view; cancellation and timeouts are the transport's own business.
pub trait Transport {
    fn call(
        &self,
        binding: &str,
        namespace: &str,
        operation: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, TransportError>;
}

/// In-process transport: routes calls straight into dispatchers.
///
/// Stands in for a real module boundary in tests and demos, exercising
/// the full encode → dispatch → decode cycle without crossing one.
#[derive(Debug, Default)]
pub struct Loopback {
    bindings: HashMap<String, Dispatcher>,
}

impl Loopback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes calls for `binding` to the given dispatcher.
    pub fn bind(&mut self, binding: impl Into<String>, dispatcher: Dispatcher) {
        self.bindings.insert(binding.into(), dispatcher);
    }
}

impl Transport for Loopback {
    fn call(
        &self,
        binding: &str,
        namespace: &str,
        operation: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        debug!(binding = %binding, namespace = %namespace, operation = %operation, "loopback call");
        let dispatcher = self
            .bindings
            .get(binding)
            .ok_or_else(|| TransportError::BindingNotFound(binding.to_string()))?;
        dispatcher
            .dispatch(operation, payload)
            .map_err(|e| TransportError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_routes_by_binding() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register("echo", |payload| Ok(payload.to_vec()));

        let mut transport = Loopback::new();
        transport.bind("default", dispatcher);

        let out = transport.call("default", "tests", "echo", &[7, 8]).unwrap();
        assert_eq!(out, [7, 8]);
    }

    #[test]
    fn missing_binding_is_opaque_failure() {
        let transport = Loopback::new();
        let err = transport.call("nope", "tests", "echo", &[]).unwrap_err();
        assert_eq!(err, TransportError::BindingNotFound("nope".into()));
    }

    #[test]
    fn dispatch_failure_becomes_transport_failure() {
        let mut transport = Loopback::new();
        transport.bind("default", Dispatcher::new());

        let err = transport
            .call("default", "tests", "doesNotExist", &[])
            .unwrap_err();
        assert!(matches!(err, TransportError::Failed(m) if m.contains("doesNotExist")));
    }
}

//! Calling-side client for the `tests` namespace.

use modlink_msgpack::{Decoder, Message};
use modlink_rpc::{RpcError, Transport};

use crate::records::{Lists, Maps, Optional, Required, TestFunctionArgs, Tests};
use crate::NAMESPACE;

/// Typed call client over any transport.
///
/// Each method encodes its canonical argument record with the two-pass
/// discipline, invokes the transport with (binding, namespace, operation,
/// buffer), and decodes the response into the declared result type.
/// Transport failures surface unchanged; there are no retries.
pub struct Host<T: Transport> {
    binding: String,
    transport: T,
}

impl<T: Transport> Host<T> {
    pub fn new(binding: impl Into<String>, transport: T) -> Self {
        Self {
            binding: binding.into(),
            transport,
        }
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }

    pub fn test_function(
        &self,
        required: Required,
        optional: Optional,
        maps: Maps,
        lists: Lists,
    ) -> Result<Tests, RpcError> {
        let args = TestFunctionArgs {
            required,
            optional,
            maps,
            lists,
        };
        let payload =
            self.transport
                .call(&self.binding, NAMESPACE, "testFunction", &args.to_vec())?;
        Ok(Tests::from_slice(&payload)?)
    }

    pub fn test_unary(&self, tests: &Tests) -> Result<Tests, RpcError> {
        let payload = self
            .transport
            .call(&self.binding, NAMESPACE, "testUnary", &tests.to_vec())?;
        Ok(Tests::from_slice(&payload)?)
    }

    /// The narrow string-result path: the response buffer holds one bare
    /// string, not a field map.
    pub fn test_decode(&self, tests: &Tests) -> Result<String, RpcError> {
        let payload = self
            .transport
            .call(&self.binding, NAMESPACE, "testDecode", &tests.to_vec())?;
        let mut d = Decoder::new(&payload);
        let value = d.read_str()?;
        Ok(value.to_owned())
    }
}

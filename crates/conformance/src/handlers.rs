//! Serving-side registration for the `tests` namespace operations.
//!
//! Each `register_*` wraps a typed handler into the raw buffer handler
//! the dispatcher stores: decode the argument record(s), invoke, encode
//! the result under the two-pass discipline.

use modlink_msgpack::{encode_to_vec, Message, MsgPackWrite};
use modlink_rpc::{Dispatcher, RpcError};

use crate::records::{Lists, Maps, Optional, Required, TestFunctionArgs, Tests};

pub struct Handlers;

impl Handlers {
    /// Binds `testFunction`: four argument records in, one `Tests` out.
    pub fn register_test_function<F>(dispatcher: &mut Dispatcher, handler: F)
    where
        F: Fn(Required, Optional, Maps, Lists) -> Result<Tests, RpcError> + Send + Sync + 'static,
    {
        dispatcher.register("testFunction", move |payload| {
            let args = TestFunctionArgs::from_slice(payload)?;
            let response = handler(args.required, args.optional, args.maps, args.lists)?;
            Ok(response.to_vec())
        });
    }

    /// Binds `testUnary`: one `Tests` in, one `Tests` out.
    pub fn register_test_unary<F>(dispatcher: &mut Dispatcher, handler: F)
    where
        F: Fn(Tests) -> Result<Tests, RpcError> + Send + Sync + 'static,
    {
        dispatcher.register("testUnary", move |payload| {
            let request = Tests::from_slice(payload)?;
            Ok(handler(request)?.to_vec())
        });
    }

    /// Binds `testDecode`: one `Tests` in, a plain string out.
    ///
    /// The string result bypasses the record codec and goes through the
    /// primitive string writer, still under the two-pass discipline.
    pub fn register_test_decode<F>(dispatcher: &mut Dispatcher, handler: F)
    where
        F: Fn(Tests) -> Result<String, RpcError> + Send + Sync + 'static,
    {
        dispatcher.register("testDecode", move |payload| {
            let request = Tests::from_slice(payload)?;
            let response = handler(request)?;
            Ok(encode_to_vec(|w| w.write_str(&response)))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlink_msgpack::Decoder;

    #[test]
    fn test_unary_echoes() {
        let mut dispatcher = Dispatcher::new();
        Handlers::register_test_unary(&mut dispatcher, Ok);

        let request = Tests::builder()
            .with_required(Required::builder().with_u64_value(7).build())
            .build();
        let payload = dispatcher.dispatch("testUnary", &request.to_vec()).unwrap();
        assert_eq!(Tests::from_slice(&payload).unwrap(), request);
    }

    #[test]
    fn test_decode_returns_bare_string() {
        let mut dispatcher = Dispatcher::new();
        Handlers::register_test_decode(&mut dispatcher, |tests| Ok(tests.required.string_value));

        let request = Tests::builder()
            .with_required(Required::builder().with_string_value("decoded").build())
            .build();
        let payload = dispatcher
            .dispatch("testDecode", &request.to_vec())
            .unwrap();

        let mut d = Decoder::new(&payload);
        assert_eq!(d.read_str().unwrap(), "decoded");
    }

    #[test]
    fn malformed_payload_aborts_only_that_call() {
        let mut dispatcher = Dispatcher::new();
        Handlers::register_test_unary(&mut dispatcher, Ok);

        // A string where the argument map should be.
        let bad = encode_to_vec(|w| w.write_str("not a record"));
        let err = dispatcher.dispatch("testUnary", &bad).unwrap_err();
        assert!(matches!(err, RpcError::Malformed(_)));

        // The registration survives and well-formed calls still work.
        let ok = dispatcher
            .dispatch("testUnary", &Tests::default().to_vec())
            .unwrap();
        assert_eq!(Tests::from_slice(&ok).unwrap(), Tests::default());
    }
}

//! Full-cycle dispatch tests: client → loopback transport → dispatcher.

use modlink_conformance::{
    Handlers, Host, Lists, Optional, Required, TestFunctionArgs, Tests, Thing,
};
use modlink_msgpack::{encode_to_vec, Message, MsgPackWrite};
use modlink_rpc::{Dispatcher, Loopback, RpcError, Transport, TransportError};

/// Mirrors the reference guest: testFunction assembles, testUnary echoes,
/// testDecode renders the required group.
fn serving_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    Handlers::register_test_function(&mut dispatcher, |required, optional, maps, lists| {
        Ok(Tests::builder()
            .with_required(required)
            .with_optional(optional)
            .with_maps(maps)
            .with_lists(lists)
            .build())
    });
    Handlers::register_test_unary(&mut dispatcher, Ok);
    Handlers::register_test_decode(&mut dispatcher, |tests| {
        Ok(format!(
            "{}/{}/{}",
            tests.required.bool_value, tests.required.u64_value, tests.required.string_value
        ))
    });
    dispatcher
}

fn host() -> Host<Loopback> {
    let mut transport = Loopback::new();
    transport.bind("default", serving_dispatcher());
    Host::new("default", transport)
}

fn sample_tests() -> Tests {
    Tests::builder()
        .with_required(
            Required::builder()
                .with_bool_value(true)
                .with_u64_value(u64::MAX)
                .with_string_value("payload")
                .with_object_value(Thing::builder().with_value("inner").build())
                .build(),
        )
        .with_optional(Optional::builder().with_u32_value(Some(7)).build())
        .with_lists(
            Lists::builder()
                .with_list_objects_optional(vec![None, Some(Thing::default())])
                .build(),
        )
        .build()
}

#[test]
fn test_unary_echo_roundtrip() {
    let tests = sample_tests();
    let response = host().test_unary(&tests).unwrap();
    assert_eq!(response, tests);
}

#[test]
fn test_function_assembles_response() {
    let tests = sample_tests();
    let response = host()
        .test_function(
            tests.required.clone(),
            tests.optional.clone(),
            tests.maps.clone(),
            tests.lists.clone(),
        )
        .unwrap();
    assert_eq!(response, tests);
}

#[test]
fn test_decode_returns_rendered_string() {
    let response = host().test_decode(&sample_tests()).unwrap();
    assert_eq!(response, format!("true/{}/payload", u64::MAX));
}

#[test]
fn unknown_operation_is_a_call_failure() {
    let dispatcher = serving_dispatcher();
    let err = dispatcher
        .dispatch("doesNotExist", &Tests::default().to_vec())
        .unwrap_err();
    assert!(matches!(err, RpcError::UnknownOperation(name) if name == "doesNotExist"));
}

#[test]
fn unknown_operation_through_transport_is_opaque() {
    let mut transport = Loopback::new();
    transport.bind("default", serving_dispatcher());
    let err = transport
        .call("default", "tests", "doesNotExist", &[0x80])
        .unwrap_err();
    assert!(matches!(err, TransportError::Failed(m) if m.contains("doesNotExist")));
}

#[test]
fn malformed_arguments_abort_only_that_call() {
    let dispatcher = serving_dispatcher();

    let bad = encode_to_vec(|w| w.write_array_len(0));
    assert!(matches!(
        dispatcher.dispatch("testUnary", &bad),
        Err(RpcError::Malformed(_))
    ));

    // Subsequent well-formed calls on the same dispatcher still succeed.
    let tests = sample_tests();
    let payload = dispatcher.dispatch("testUnary", &tests.to_vec()).unwrap();
    assert_eq!(Tests::from_slice(&payload).unwrap(), tests);
}

#[test]
fn args_envelope_matches_wire_contract() {
    // The testFunction argument buffer is itself a well-formed record.
    let tests = sample_tests();
    let args = TestFunctionArgs {
        required: tests.required.clone(),
        optional: tests.optional.clone(),
        maps: tests.maps.clone(),
        lists: tests.lists.clone(),
    };
    let back = TestFunctionArgs::from_slice(&args.to_vec()).unwrap();
    assert_eq!(back, args);
}

#[test]
fn handler_rebinding_last_wins_end_to_end() {
    let mut dispatcher = Dispatcher::new();
    Handlers::register_test_decode(&mut dispatcher, |_| Ok("first".to_string()));
    Handlers::register_test_decode(&mut dispatcher, |_| Ok("second".to_string()));

    let mut transport = Loopback::new();
    transport.bind("default", dispatcher);
    let host = Host::new("default", transport);

    assert_eq!(host.test_decode(&Tests::default()).unwrap(), "second");
}

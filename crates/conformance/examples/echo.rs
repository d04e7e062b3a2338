//! End-to-end demo: register the three handlers, then call them through
//! the loopback transport.
//!
//! Run with `cargo run -p modlink-conformance --example echo`.

use modlink_conformance::{Handlers, Host, Optional, Required, Tests, Thing};
use modlink_rpc::{Dispatcher, Loopback};

fn main() {
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
            "bool={} u64={} string={:?}",
            tests.required.bool_value, tests.required.u64_value, tests.required.string_value
        ))
    });

    let mut transport = Loopback::new();
    transport.bind("default", dispatcher);
    let host = Host::new("default", transport);

    let tests = Tests::builder()
        .with_required(
            Required::builder()
                .with_bool_value(true)
                .with_u64_value(42)
                .with_string_value("hello")
                .with_object_value(Thing::builder().with_value("nested").build())
                .build(),
        )
        .with_optional(Optional::builder().with_string_value(Some("present".into())).build())
        .build();

    let echoed = host.test_unary(&tests).expect("testUnary");
    println!("testUnary echoed equal: {}", echoed == tests);

    let rendered = host.test_decode(&tests).expect("testDecode");
    println!("testDecode: {rendered}");

    let assembled = host
        .test_function(
            tests.required.clone(),
            tests.optional.clone(),
            tests.maps.clone(),
            tests.lists.clone(),
        )
        .expect("testFunction");
    println!("testFunction assembled equal: {}", assembled == tests);
}

//! Canonical record schema and call surface for the `tests` namespace.
//!
//! The record set covers every shape the codec supports - required
//! scalars, nullable scalars, maps, lists, nested records, and lists of
//! nullable nested records - and the three operations exercise the full
//! cross-boundary cycle:
//!
//! - `testFunction` - four argument records in, one [`Tests`] out
//! - `testUnary` - one [`Tests`] in, one [`Tests`] out
//! - `testDecode` - one [`Tests`] in, a bare string out (the narrow
//!   string-result path)
//!
//! The serving side registers typed handlers through [`Handlers`]; the
//! calling side goes through [`Host`] over any
//! [`Transport`](modlink_rpc::Transport).

mod handlers;
mod host;
mod records;

pub use handlers::Handlers;
pub use host::Host;
pub use records::{
    Lists, ListsBuilder, Maps, MapsBuilder, Optional, OptionalBuilder, Required, RequiredBuilder,
    TestFunctionArgs, Tests, TestsBuilder, Thing, ThingBuilder,
};

/// Namespace string carried on every outbound call.
pub const NAMESPACE: &str = "tests";

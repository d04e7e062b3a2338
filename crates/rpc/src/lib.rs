//! Operation registry, dispatch, and the call transport seam.
//!
//! The serving side owns a [`Dispatcher`]: an explicit object mapping
//! operation names to handlers, built during initialization and read-only
//! afterwards. The calling side addresses a [`Transport`] with a binding
//! identifier, a namespace, and an operation name, sending and receiving
//! one binary buffer per call. Failures abort exactly the call that
//! raised them; see [`RpcError`].

mod dispatcher;
mod error;
mod transport;

pub use dispatcher::{Dispatcher, Handler};
pub use error::{RpcError, TransportError};
pub use transport::{Loopback, Transport};

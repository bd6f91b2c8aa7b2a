//! Side effects: the transport boundary and the dispatcher that drives it.

mod dispatch;
mod mock;
#[cfg(feature = "reqwest")]
mod reqwest_impl;
mod transport;

pub use dispatch::dispatch;
pub use mock::{MockError, MockTransport};
#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestTransport;
pub use transport::{FnTransport, SharedTransport, Transport, transport_fn};

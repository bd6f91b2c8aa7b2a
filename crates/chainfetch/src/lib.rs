//! Immutable, chainable HTTP request configuration over a pluggable transport.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable request options, responses and keys
//! - [`transform`] - Pure transformations (merging, JSON encoding, routing)
//! - effects - The [`Transport`] boundary and the dispatcher
//!
//! A [`Configuration`] is a persistent map from [`Key`] to [`Value`] layered
//! over a shared [`Defaults`] registry. Setters never mutate: each returns a
//! new configuration, so a base can be forked into per-endpoint variants and
//! dispatched concurrently.
//!
//! # Key Features
//!
//! - **Scalar and merge keys**: most keys replace, request options and
//!   status callbacks merge entry by entry
//! - **Single routing**: every response reaches exactly one handler
//! - **JSON bodies**: a `json_body` option is serialized right before sending
//! - **Pluggable transport**: `reqwest` by default, closures and mocks in tests
//!
//! # Example
//!
//! ```
//! use chainfetch::{Configuration, MockTransport, Response};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> chainfetch::Result<()> {
//! let transport = MockTransport::new().with_response("/test", Response::new(200, "Hello"));
//! let base: Configuration<String> = Configuration::with_transport(transport);
//!
//! let api = base.on_error(|response: Response| async move {
//!     Ok::<_, chainfetch::BoxError>(format!("failed with {}", response.status()))
//! });
//!
//! assert_eq!(api.get("/test").await?, "Hello");
//! # Ok(())
//! # }
//! ```

mod config;
pub mod data;
mod effects;
mod error;
pub mod transform;

pub use config::{
    BeforeRunHook, Configuration, ConnectionHandler, DefaultFactory, Defaults, Patch,
    ResponseHandler, StatusCallbacks, StatusPatch, Value,
};
pub use data::{Key, KeyKind, RequestDescriptor, RequestOptions, Response};
pub use effects::{
    FnTransport, MockError, MockTransport, SharedTransport, Transport, dispatch, transport_fn,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestTransport;

pub use error::{BoxError, Error, Result};

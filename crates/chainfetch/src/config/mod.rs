//! The configuration store: keys, values, defaults and the chainable setters.

mod builder;
mod defaults;
mod handler;
mod store;
mod value;

pub use defaults::{DefaultFactory, Defaults};
pub use handler::{BeforeRunHook, ConnectionHandler, ResponseHandler, StatusCallbacks, StatusPatch};
pub use store::Configuration;
pub use value::{Patch, Value};

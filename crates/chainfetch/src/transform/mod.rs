//! Pure transformations used by the configuration store and the dispatcher.
//!
//! Nothing in here performs I/O or touches a transport; every function maps
//! its inputs to a fresh output.

mod encode;
mod merge;
mod route;
mod status;

pub use encode::{JSON_CONTENT_TYPE, encode_json_body};
pub use merge::{merge_entries, merge_options};
pub use route::{Route, Slot};
pub use status::is_success;

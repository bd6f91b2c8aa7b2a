//! Immutable data types shared by the configuration store and the dispatcher.
//!
//! These types carry no behavior beyond construction and inspection; they
//! are passed between layers without mutation.

pub mod key;
pub mod options;
pub mod response;

pub use key::{Key, KeyKind};
pub use options::RequestOptions;
pub use response::Response;

/// The exact pair handed to the transport for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub url: String,
    pub options: RequestOptions,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            url: url.into(),
            options,
        }
    }
}

use std::collections::BTreeMap;
use std::fmt;

/// The callback slot chosen for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Status(u16),
    Success,
    Error,
    Response,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Status(status) => write!(f, "on_status({status})"),
            Slot::Success => write!(f, "on_success"),
            Slot::Error => write!(f, "on_error"),
            Slot::Response => write!(f, "on_response"),
        }
    }
}

/// The resolved handler table for one dispatch.
///
/// Generic over the handler type so the precedence rules can be exercised
/// with plain values.
#[derive(Debug)]
pub struct Route<'a, H> {
    pub by_status: &'a BTreeMap<u16, H>,
    pub on_success: Option<&'a H>,
    pub on_error: Option<&'a H>,
    pub on_response: &'a H,
}

impl<'a, H> Route<'a, H> {
    /// Pick exactly one handler for a response.
    ///
    /// A handler registered for the exact status wins; then the success or
    /// error handler, depending on `ok`, if one is set; then the response
    /// handler.
    pub fn select(&self, status: u16, ok: bool) -> (Slot, &'a H) {
        if let Some(handler) = self.by_status.get(&status) {
            return (Slot::Status(status), handler);
        }

        let by_outcome = if ok {
            self.on_success.map(|handler| (Slot::Success, handler))
        } else {
            self.on_error.map(|handler| (Slot::Error, handler))
        };

        by_outcome.unwrap_or((Slot::Response, self.on_response))
    }
}

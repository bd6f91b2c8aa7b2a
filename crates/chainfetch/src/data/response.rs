use std::borrow::Cow;

use bytes::Bytes;

use crate::transform::is_success;

/// A response produced by a transport.
///
/// The body is kept as raw bytes; interpreting it is left to the callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    ok: bool,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Response {
    /// Create a response whose `ok` flag follows the status (`200..300`).
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            ok: is_success(status),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Override the `ok` flag computed from the status.
    #[must_use]
    pub fn with_ok(mut self, ok: bool) -> Self {
        self.ok = ok;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header with the given name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// The body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

impl From<Response> for Bytes {
    fn from(response: Response) -> Self {
        response.body
    }
}

impl From<Response> for String {
    fn from(response: Response) -> Self {
        response.text().into_owned()
    }
}

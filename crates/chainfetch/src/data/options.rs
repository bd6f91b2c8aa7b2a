use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Option entry naming the HTTP method.
pub const METHOD: &str = "method";
/// Option entry holding the header object.
pub const HEADERS: &str = "headers";
/// Option entry holding the raw request body.
pub const BODY: &str = "body";
/// Option entry holding a JSON value to be encoded into [`BODY`].
pub const JSON_BODY: &str = "json_body";
/// Option entry for the credentials mode.
pub const CREDENTIALS: &str = "credentials";

/// Options handed to the transport.
///
/// This is an open mapping: besides the well-known entries (`method`,
/// `headers`, `body`, `json_body`, `credentials`) any transport-specific entry
/// may be stored with [`RequestOptions::with_entry`].
///
/// When options are merged into a configuration, an entry whose value is
/// `null` removes that entry instead of storing the null.
///
/// # Examples
///
/// ```
/// use chainfetch::RequestOptions;
///
/// let options = RequestOptions::new()
///     .with_method("POST")
///     .with_header("Authorization", "Bearer token")
///     .with_header("Accept", "application/json");
///
/// assert_eq!(options.method(), Some("POST"));
/// assert_eq!(options.header("authorization"), Some("Bearer token"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestOptions(Map<String, Value>);

impl RequestOptions {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set an arbitrary entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Mark an entry for removal.
    ///
    /// Stores a `null`, which deletes the entry when these options are merged
    /// into a configuration.
    ///
    /// ```
    /// use chainfetch::RequestOptions;
    ///
    /// let clearing = RequestOptions::new().cleared("credentials");
    /// assert!(clearing.get("credentials").is_some_and(|v| v.is_null()));
    /// ```
    #[must_use]
    pub fn cleared(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), Value::Null);
        self
    }

    #[must_use]
    pub fn with_method(self, method: impl Into<String>) -> Self {
        self.with_entry(METHOD, Value::String(method.into()))
    }

    /// Add a single header, keeping the headers already present.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let headers = self
            .0
            .entry(HEADERS)
            .or_insert_with(|| Value::Object(Map::new()));

        if !headers.is_object() {
            *headers = Value::Object(Map::new());
        }
        if let Value::Object(headers) = headers {
            headers.insert(name.into(), Value::String(value.into()));
        }
        self
    }

    /// Replace the whole header object.
    #[must_use]
    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let headers: Map<String, Value> = headers
            .into_iter()
            .map(|(name, value)| (name.into(), Value::String(value.into())))
            .collect();
        self.with_entry(HEADERS, headers)
    }

    #[must_use]
    pub fn with_credentials(self, credentials: impl Into<String>) -> Self {
        self.with_entry(CREDENTIALS, Value::String(credentials.into()))
    }

    /// Set a raw, already encoded body.
    #[must_use]
    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.with_entry(BODY, Value::String(body.into()))
    }

    /// Attach a value to be sent as JSON.
    ///
    /// The value is converted now, so a value that cannot be represented as
    /// JSON fails here rather than at dispatch. The JSON text and the
    /// `Content-Type` header are produced when the request runs.
    ///
    /// ```
    /// use chainfetch::RequestOptions;
    /// use serde_json::json;
    ///
    /// let options = RequestOptions::new()
    ///     .with_method("POST")
    ///     .with_json_body(&json!({ "a": 1 }))
    ///     .unwrap();
    ///
    /// assert_eq!(options.json_body(), Some(&json!({ "a": 1 })));
    /// ```
    pub fn with_json_body<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        Ok(self.with_entry(JSON_BODY, value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn method(&self) -> Option<&str> {
        self.get(METHOD).and_then(Value::as_str)
    }

    pub fn headers(&self) -> Option<&Map<String, Value>> {
        self.get(HEADERS).and_then(Value::as_object)
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&str> {
        self.get(BODY).and_then(Value::as_str)
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.get(JSON_BODY).filter(|value| !value.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }
}

impl From<Map<String, Value>> for RequestOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RequestOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

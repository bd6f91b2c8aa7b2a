use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::config::defaults::Defaults;
use crate::config::handler::{BeforeRunHook, ConnectionHandler, ResponseHandler, StatusCallbacks};
use crate::config::value::{Patch, Value};
use crate::data::{Key, KeyKind, RequestOptions, Response};
use crate::effects::{SharedTransport, Transport};
use crate::error::{Error, Result};
use crate::transform::{merge_entries, merge_options};

/// Immutable builder state describing one request.
///
/// Every setter returns a new configuration and leaves `self` untouched, so a
/// configuration can be forked freely and the forks dispatched from any
/// number of tasks. `T` is the outcome type produced by the callbacks.
///
/// # Examples
///
/// ```no_run
/// use chainfetch::{Configuration, Response};
///
/// # async fn example() -> chainfetch::Result<()> {
/// let base: Configuration = Configuration::reqwest();
///
/// let api = base
///     .on_status(404, |_response: Response| async {
///         Ok::<_, chainfetch::BoxError>(Response::new(404, "missing"))
///     });
///
/// let response = api.run_request("https://example.com", Default::default()).await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
pub struct Configuration<T = Response> {
    values: Arc<HashMap<Key, Value<T>>>,
    defaults: Arc<Defaults<T>>,
}

impl<T> Configuration<T> {
    /// A base configuration resolving unset keys through `defaults`.
    pub fn new(defaults: Defaults<T>) -> Self {
        Self {
            values: Arc::new(HashMap::new()),
            defaults: Arc::new(defaults),
        }
    }

    /// The current value of `key`: its override if set, otherwise its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the key has neither.
    pub fn value(&self, key: Key) -> Result<Value<T>> {
        if let Some(value) = self.values.get(&key) {
            return Ok(value.clone());
        }
        self.defaults
            .produce(key)
            .ok_or(Error::Configuration { key })
    }

    /// Returns `true` if `key` has an override on this configuration.
    pub fn is_set(&self, key: Key) -> bool {
        self.values.contains_key(&key)
    }

    /// Store a value under its key.
    ///
    /// Scalar keys are replaced. Values for merge keys are merged entry by
    /// entry, exactly like [`Configuration::merge_set`].
    #[must_use]
    pub fn set(&self, value: Value<T>) -> Self {
        match value {
            Value::RequestOptions(options) => self.merge_set(Patch::RequestOptions(options)),
            Value::OnStatusCallbacks(callbacks) => self.merge_set(Patch::OnStatusCallbacks(
                callbacks
                    .into_iter()
                    .map(|(status, handler)| (status, Some(handler)))
                    .collect(),
            )),
            value => self.with_value(value),
        }
    }

    /// Shallow-merge `patch` into the current value of its key.
    ///
    /// Entries not named by the patch are kept; removal entries (`null`
    /// options, `None` callbacks) delete the matching entry.
    #[must_use]
    pub fn merge_set(&self, patch: Patch<T>) -> Self {
        debug_assert_eq!(patch.key().kind(), KeyKind::Merge);

        match patch {
            Patch::RequestOptions(patch) => {
                let current = match self.value(Key::RequestOptions) {
                    Ok(Value::RequestOptions(options)) => options,
                    Err(Error::Configuration { .. }) => RequestOptions::new(),
                    // Keep the misregistered default so resolving it reports the mismatch.
                    _ => return self.clone(),
                };
                self.with_value(Value::RequestOptions(merge_options(&current, &patch)))
            }
            Patch::OnStatusCallbacks(patch) => {
                let current = match self.value(Key::OnStatusCallbacks) {
                    Ok(Value::OnStatusCallbacks(callbacks)) => callbacks,
                    Err(Error::Configuration { .. }) => BTreeMap::new(),
                    _ => return self.clone(),
                };
                self.with_value(Value::OnStatusCallbacks(merge_entries(&current, patch)))
            }
        }
    }

    fn with_value(&self, value: Value<T>) -> Self {
        let mut values = (*self.values).clone();
        values.insert(value.key(), value);

        Self {
            values: Arc::new(values),
            defaults: Arc::clone(&self.defaults),
        }
    }

    pub(crate) fn transport(&self) -> Result<SharedTransport> {
        match self.value(Key::Transport)? {
            Value::Transport(transport) => Ok(transport),
            other => Err(unexpected(Key::Transport, &other)),
        }
    }

    pub(crate) fn target_url(&self) -> Result<String> {
        match self.value(Key::Url)? {
            Value::Url(url) => Ok(url),
            other => Err(unexpected(Key::Url, &other)),
        }
    }

    pub(crate) fn options(&self) -> Result<RequestOptions> {
        match self.value(Key::RequestOptions)? {
            Value::RequestOptions(options) => Ok(options),
            other => Err(unexpected(Key::RequestOptions, &other)),
        }
    }

    pub(crate) fn response_handler(&self) -> Result<ResponseHandler<T>> {
        match self.value(Key::OnResponse)? {
            Value::OnResponse(handler) => Ok(handler),
            other => Err(unexpected(Key::OnResponse, &other)),
        }
    }

    pub(crate) fn success_handler(&self) -> Result<Option<ResponseHandler<T>>> {
        match self.value(Key::OnSuccess)? {
            Value::OnSuccess(handler) => Ok(handler),
            other => Err(unexpected(Key::OnSuccess, &other)),
        }
    }

    pub(crate) fn error_handler(&self) -> Result<Option<ResponseHandler<T>>> {
        match self.value(Key::OnError)? {
            Value::OnError(handler) => Ok(handler),
            other => Err(unexpected(Key::OnError, &other)),
        }
    }

    pub(crate) fn connection_handler(&self) -> Result<Option<ConnectionHandler<T>>> {
        match self.value(Key::OnConnectionError)? {
            Value::OnConnectionError(handler) => Ok(handler),
            other => Err(unexpected(Key::OnConnectionError, &other)),
        }
    }

    pub(crate) fn before_run(&self) -> Result<BeforeRunHook<T>> {
        match self.value(Key::OnBeforeRun)? {
            Value::OnBeforeRun(hook) => Ok(hook),
            other => Err(unexpected(Key::OnBeforeRun, &other)),
        }
    }

    pub(crate) fn status_callbacks(&self) -> Result<StatusCallbacks<T>> {
        match self.value(Key::OnStatusCallbacks)? {
            Value::OnStatusCallbacks(callbacks) => Ok(callbacks),
            other => Err(unexpected(Key::OnStatusCallbacks, &other)),
        }
    }
}

impl<T: From<Response> + Send + 'static> Configuration<T> {
    /// A base configuration with the standard defaults and `transport` as the
    /// default transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::new(Defaults::standard(Some(Arc::new(transport))))
    }

    /// A base configuration whose default transport is a fresh
    /// [`ReqwestTransport`](crate::ReqwestTransport).
    #[cfg(feature = "reqwest")]
    pub fn reqwest() -> Self {
        Self::with_transport(crate::effects::ReqwestTransport::new())
    }
}

/// The standard defaults without a default transport.
impl<T: From<Response> + Send + 'static> Default for Configuration<T> {
    fn default() -> Self {
        Self::new(Defaults::standard(None))
    }
}

impl<T> Clone for Configuration<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            defaults: Arc::clone(&self.defaults),
        }
    }
}

impl<T> fmt::Debug for Configuration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values: Vec<&Value<T>> = self.values.values().collect();
        values.sort_by_key(|value| value.key());
        f.debug_struct("Configuration")
            .field("values", &values)
            .field("defaults", &self.defaults)
            .finish()
    }
}

fn unexpected<T>(key: Key, found: &Value<T>) -> Error {
    Error::UnexpectedValue {
        key,
        found: found.key(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::handler::StatusPatch;
    use serde_json::json;

    fn base() -> Configuration {
        Configuration::default()
    }

    #[test]
    fn test_value_falls_back_to_default() {
        let config = base();

        assert!(matches!(
            config.value(Key::RequestOptions),
            Ok(Value::RequestOptions(options)) if options.is_empty()
        ));
        assert!(matches!(config.value(Key::OnSuccess), Ok(Value::OnSuccess(None))));
    }

    #[test]
    fn test_value_without_default_fails() {
        let config = base();

        assert!(matches!(
            config.value(Key::Url),
            Err(Error::Configuration { key: Key::Url })
        ));
        assert!(matches!(
            config.value(Key::Transport),
            Err(Error::Configuration { key: Key::Transport })
        ));
    }

    #[test]
    fn test_set_leaves_receiver_untouched() {
        let config = base();
        let derived = config.set(Value::Url("https://example.com".to_string()));

        assert!(!config.is_set(Key::Url));
        assert!(derived.is_set(Key::Url));
        assert_eq!(derived.target_url().unwrap(), "https://example.com");
    }

    #[test]
    fn test_set_scalar_replaces() {
        let config = base()
            .set(Value::Url("/a".to_string()))
            .set(Value::Url("/b".to_string()));

        assert_eq!(config.target_url().unwrap(), "/b");
    }

    #[test]
    fn test_set_merge_key_merges() {
        let config = base()
            .set(Value::RequestOptions(RequestOptions::new().with_method("POST")))
            .set(Value::RequestOptions(
                RequestOptions::new().with_credentials("include"),
            ));

        let options = config.options().unwrap();
        assert_eq!(options.method(), Some("POST"));
        assert_eq!(options.get("credentials"), Some(&json!("include")));
    }

    #[test]
    fn test_merge_set_removes_null_entries() {
        let config = base()
            .merge_set(Patch::RequestOptions(
                RequestOptions::new()
                    .with_method("POST")
                    .with_credentials("include"),
            ))
            .merge_set(Patch::RequestOptions(RequestOptions::new().cleared("credentials")));

        let options = config.options().unwrap();
        assert!(!options.contains("credentials"));
        assert_eq!(options.method(), Some("POST"));
    }

    #[test]
    fn test_merge_set_status_callbacks() {
        let handler = ResponseHandler::new(|response: Response| async move {
            Ok::<_, Error>(response)
        });
        let config = base().merge_set(Patch::OnStatusCallbacks(StatusPatch::from([
            (200, Some(handler.clone())),
            (404, Some(handler.clone())),
        ])));
        let cleared = config.merge_set(Patch::OnStatusCallbacks(StatusPatch::from([(404, None)])));

        assert_eq!(config.status_callbacks().unwrap().len(), 2);
        let remaining = cleared.status_callbacks().unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[&200].ptr_eq(&handler));
    }

    #[test]
    fn test_merge_set_without_default_starts_empty() {
        let config: Configuration = Configuration::new(Defaults::empty());
        let config = config.merge_set(Patch::RequestOptions(RequestOptions::new().with_method("GET")));

        assert_eq!(config.options().unwrap().method(), Some("GET"));
    }

    #[test]
    fn test_unexpected_default_value() {
        let defaults = Defaults::<Response>::empty()
            .register_scalar(Key::Url, || Value::OnSuccess(None))
            .unwrap();
        let config = Configuration::new(defaults);

        assert!(matches!(
            config.target_url(),
            Err(Error::UnexpectedValue {
                key: Key::Url,
                found: Key::OnSuccess
            })
        ));
    }

    #[test]
    fn test_merge_set_keeps_misregistered_default() {
        let defaults = Defaults::<Response>::empty()
            .register_merge(Key::RequestOptions, || Value::Url("/".to_string()))
            .and_then(|defaults| {
                defaults.register_merge(Key::OnStatusCallbacks, || Value::OnSuccess(None))
            })
            .unwrap();
        let config = Configuration::new(defaults)
            .merge_set(Patch::RequestOptions(RequestOptions::new().with_method("GET")))
            .merge_set(Patch::OnStatusCallbacks(StatusPatch::from([(404, None)])));

        assert!(matches!(
            config.options(),
            Err(Error::UnexpectedValue {
                key: Key::RequestOptions,
                found: Key::Url
            })
        ));
        assert!(matches!(
            config.status_callbacks(),
            Err(Error::UnexpectedValue {
                key: Key::OnStatusCallbacks,
                found: Key::OnSuccess
            })
        ));
    }

    #[test]
    fn test_defaults_are_shared() {
        let config = base();
        let derived = config.set(Value::Url("/x".to_string()));

        assert!(Arc::ptr_eq(&config.defaults, &derived.defaults));
    }
}

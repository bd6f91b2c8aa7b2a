use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::config::handler::{BeforeRunHook, ResponseHandler};
use crate::config::value::Value;
use crate::data::{Key, KeyKind, RequestOptions, Response};
use crate::effects::SharedTransport;
use crate::error::{Error, Result};

/// Zero-argument factory producing a key's default value.
pub type DefaultFactory<T> = Arc<dyn Fn() -> Value<T> + Send + Sync>;

/// Default values for every key, fixed when the base configuration is built.
///
/// All configurations derived from one base share the same registry.
pub struct Defaults<T> {
    factories: HashMap<Key, DefaultFactory<T>>,
}

impl<T> Defaults<T> {
    /// A registry without any default. Every key must then be set explicitly.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register the default of a scalar key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyKind`] if `key` is a merge key.
    pub fn register_scalar<F>(self, key: Key, factory: F) -> Result<Self>
    where
        F: Fn() -> Value<T> + Send + Sync + 'static,
    {
        self.register(key, KeyKind::Scalar, factory)
    }

    /// Register the default of a merge key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyKind`] if `key` is a scalar key.
    pub fn register_merge<F>(self, key: Key, factory: F) -> Result<Self>
    where
        F: Fn() -> Value<T> + Send + Sync + 'static,
    {
        self.register(key, KeyKind::Merge, factory)
    }

    pub fn is_registered(&self, key: Key) -> bool {
        self.factories.contains_key(&key)
    }

    pub(crate) fn produce(&self, key: Key) -> Option<Value<T>> {
        self.factories.get(&key).map(|factory| factory())
    }

    fn register<F>(mut self, key: Key, kind: KeyKind, factory: F) -> Result<Self>
    where
        F: Fn() -> Value<T> + Send + Sync + 'static,
    {
        if key.kind() != kind {
            return Err(Error::KeyKind {
                key,
                expected: kind,
            });
        }
        self.insert(key, factory);
        Ok(self)
    }

    fn insert<F>(&mut self, key: Key, factory: F)
    where
        F: Fn() -> Value<T> + Send + Sync + 'static,
    {
        self.factories.insert(key, Arc::new(factory));
    }
}

impl<T: From<Response> + Send + 'static> Defaults<T> {
    /// The standard registry.
    ///
    /// | key                  | default               |
    /// |----------------------|-----------------------|
    /// | `transport`          | `transport`, if given |
    /// | `url`                | none                  |
    /// | `request_options`    | empty                 |
    /// | `on_response`        | identity              |
    /// | `on_success`         | unset                 |
    /// | `on_error`           | unset                 |
    /// | `on_connection_error`| unset (re-raise)      |
    /// | `on_status_callbacks`| empty                 |
    /// | `on_before_run`      | identity              |
    pub fn standard(transport: Option<SharedTransport>) -> Self {
        let mut defaults = Self::empty();

        if let Some(transport) = transport {
            defaults.insert(Key::Transport, move || {
                Value::Transport(Arc::clone(&transport))
            });
        }
        defaults.insert(Key::RequestOptions, || {
            Value::RequestOptions(RequestOptions::new())
        });
        defaults.insert(Key::OnResponse, || {
            Value::OnResponse(ResponseHandler::identity())
        });
        defaults.insert(Key::OnSuccess, || Value::OnSuccess(None));
        defaults.insert(Key::OnError, || Value::OnError(None));
        defaults.insert(Key::OnConnectionError, || Value::OnConnectionError(None));
        defaults.insert(Key::OnStatusCallbacks, || {
            Value::OnStatusCallbacks(BTreeMap::new())
        });
        defaults.insert(Key::OnBeforeRun, || {
            Value::OnBeforeRun(BeforeRunHook::identity())
        });

        defaults
    }
}

impl<T> fmt::Debug for Defaults<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&Key> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("Defaults").field("registered", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_no_url_or_transport() {
        let defaults = Defaults::<Response>::standard(None);

        assert!(!defaults.is_registered(Key::Url));
        assert!(!defaults.is_registered(Key::Transport));
        assert!(defaults.is_registered(Key::OnResponse));
        assert!(defaults.is_registered(Key::OnStatusCallbacks));
    }

    #[test]
    fn test_register_rejects_wrong_kind() {
        let result = Defaults::<Response>::empty()
            .register_scalar(Key::RequestOptions, || Value::RequestOptions(RequestOptions::new()));

        assert!(matches!(
            result,
            Err(Error::KeyKind {
                key: Key::RequestOptions,
                expected: KeyKind::Scalar
            })
        ));

        let result = Defaults::<Response>::empty()
            .register_merge(Key::Url, || Value::Url("/".to_string()));

        assert!(matches!(result, Err(Error::KeyKind { key: Key::Url, .. })));
    }

    #[test]
    fn test_register_and_produce() {
        let defaults = Defaults::<Response>::empty()
            .register_scalar(Key::Url, || Value::Url("https://example.com".to_string()))
            .unwrap();

        match defaults.produce(Key::Url) {
            Some(Value::Url(url)) => assert_eq!(url, "https://example.com"),
            other => panic!("unexpected default: {other:?}"),
        }
        assert!(defaults.produce(Key::OnResponse).is_none());
    }
}

use std::fmt;

use crate::config::handler::{
    BeforeRunHook, ConnectionHandler, ResponseHandler, StatusCallbacks, StatusPatch,
};
use crate::data::{Key, RequestOptions};
use crate::effects::SharedTransport;

/// The value stored under one [`Key`]; each variant belongs to exactly one key.
///
/// For `OnSuccess`, `OnError` and `OnConnectionError`, `None` means "no
/// handler": routing skips the slot as if it had never been set.
pub enum Value<T> {
    Transport(SharedTransport),
    Url(String),
    RequestOptions(RequestOptions),
    OnResponse(ResponseHandler<T>),
    OnSuccess(Option<ResponseHandler<T>>),
    OnError(Option<ResponseHandler<T>>),
    OnConnectionError(Option<ConnectionHandler<T>>),
    OnBeforeRun(BeforeRunHook<T>),
    OnStatusCallbacks(StatusCallbacks<T>),
}

impl<T> Value<T> {
    pub fn key(&self) -> Key {
        match self {
            Value::Transport(_) => Key::Transport,
            Value::Url(_) => Key::Url,
            Value::RequestOptions(_) => Key::RequestOptions,
            Value::OnResponse(_) => Key::OnResponse,
            Value::OnSuccess(_) => Key::OnSuccess,
            Value::OnError(_) => Key::OnError,
            Value::OnConnectionError(_) => Key::OnConnectionError,
            Value::OnBeforeRun(_) => Key::OnBeforeRun,
            Value::OnStatusCallbacks(_) => Key::OnStatusCallbacks,
        }
    }
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        match self {
            Value::Transport(transport) => Value::Transport(transport.clone()),
            Value::Url(url) => Value::Url(url.clone()),
            Value::RequestOptions(options) => Value::RequestOptions(options.clone()),
            Value::OnResponse(handler) => Value::OnResponse(handler.clone()),
            Value::OnSuccess(handler) => Value::OnSuccess(handler.clone()),
            Value::OnError(handler) => Value::OnError(handler.clone()),
            Value::OnConnectionError(handler) => Value::OnConnectionError(handler.clone()),
            Value::OnBeforeRun(hook) => Value::OnBeforeRun(hook.clone()),
            Value::OnStatusCallbacks(callbacks) => Value::OnStatusCallbacks(callbacks.clone()),
        }
    }
}

impl<T> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Transport(_) => f.write_str("Transport(..)"),
            Value::Url(url) => f.debug_tuple("Url").field(url).finish(),
            Value::RequestOptions(options) => {
                f.debug_tuple("RequestOptions").field(options).finish()
            }
            Value::OnResponse(_) => f.write_str("OnResponse(..)"),
            Value::OnSuccess(handler) => write_slot(f, "OnSuccess", handler.is_some()),
            Value::OnError(handler) => write_slot(f, "OnError", handler.is_some()),
            Value::OnConnectionError(handler) => {
                write_slot(f, "OnConnectionError", handler.is_some())
            }
            Value::OnBeforeRun(_) => f.write_str("OnBeforeRun(..)"),
            Value::OnStatusCallbacks(callbacks) => f
                .debug_tuple("OnStatusCallbacks")
                .field(&callbacks.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

fn write_slot(f: &mut fmt::Formatter<'_>, name: &str, set: bool) -> fmt::Result {
    if set {
        write!(f, "{name}(Some(..))")
    } else {
        write!(f, "{name}(None)")
    }
}

/// A partial update for a merge key.
pub enum Patch<T> {
    /// Entries to merge into the request options; `null` entries remove.
    RequestOptions(RequestOptions),
    /// Entries to merge into the status callbacks; `None` entries remove.
    OnStatusCallbacks(StatusPatch<T>),
}

impl<T> Patch<T> {
    pub fn key(&self) -> Key {
        match self {
            Patch::RequestOptions(_) => Key::RequestOptions,
            Patch::OnStatusCallbacks(_) => Key::OnStatusCallbacks,
        }
    }
}

impl<T> fmt::Debug for Patch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Patch::RequestOptions(options) => {
                f.debug_tuple("RequestOptions").field(options).finish()
            }
            Patch::OnStatusCallbacks(callbacks) => f
                .debug_tuple("OnStatusCallbacks")
                .field(
                    &callbacks
                        .iter()
                        .map(|(status, handler)| (status, handler.is_some()))
                        .collect::<Vec<_>>(),
                )
                .finish(),
        }
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::future::{self, Future};
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::config::Configuration;
use crate::data::Response;
use crate::error::BoxError;

type ResponseFn<T> = dyn Fn(Response) -> BoxFuture<'static, Result<T, BoxError>> + Send + Sync;
type ConnectionFn<T> = dyn Fn(BoxError) -> BoxFuture<'static, Result<T, BoxError>> + Send + Sync;
type BeforeRunFn<T> = dyn Fn(Configuration<T>) -> Configuration<T> + Send + Sync;

/// Per-status response handlers.
pub type StatusCallbacks<T> = BTreeMap<u16, ResponseHandler<T>>;

/// A partial update of [`StatusCallbacks`]; `None` removes the status.
pub type StatusPatch<T> = BTreeMap<u16, Option<ResponseHandler<T>>>;

/// A callback that turns a [`Response`] into the outcome of a dispatch.
pub struct ResponseHandler<T> {
    f: Arc<ResponseFn<T>>,
}

impl<T: Send + 'static> ResponseHandler<T> {
    pub fn new<F, Fut, E>(f: F) -> Self
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Self {
            f: Arc::new(move |response: Response| {
                f(response).map(|r| r.map_err(Into::<BoxError>::into)).boxed()
            }),
        }
    }

    /// Hand the response back as the outcome.
    pub fn identity() -> Self
    where
        T: From<Response>,
    {
        Self {
            f: Arc::new(|response: Response| {
                future::ready(Ok::<T, BoxError>(T::from(response))).boxed()
            }),
        }
    }
}

impl<T> ResponseHandler<T> {
    pub fn call(&self, response: Response) -> BoxFuture<'static, Result<T, BoxError>> {
        (self.f)(response)
    }

    /// Returns `true` if both handles point to the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<T> Clone for ResponseHandler<T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T> fmt::Debug for ResponseHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseHandler { .. }")
    }
}

/// A callback receiving the transport's error when the call itself failed.
pub struct ConnectionHandler<T> {
    f: Arc<ConnectionFn<T>>,
}

impl<T: Send + 'static> ConnectionHandler<T> {
    pub fn new<F, Fut, E>(f: F) -> Self
    where
        F: Fn(BoxError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Self {
            f: Arc::new(move |error: BoxError| {
                f(error).map(|r| r.map_err(Into::<BoxError>::into)).boxed()
            }),
        }
    }
}

impl<T> ConnectionHandler<T> {
    pub fn call(&self, error: BoxError) -> BoxFuture<'static, Result<T, BoxError>> {
        (self.f)(error)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<T> Clone for ConnectionHandler<T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T> fmt::Debug for ConnectionHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConnectionHandler { .. }")
    }
}

/// A last-moment rewrite of the configuration, applied once per dispatch.
pub struct BeforeRunHook<T> {
    f: Arc<BeforeRunFn<T>>,
}

impl<T: Send + 'static> BeforeRunHook<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Configuration<T>) -> Configuration<T> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    pub fn identity() -> Self {
        Self {
            f: Arc::new(|config: Configuration<T>| config),
        }
    }
}

impl<T> BeforeRunHook<T> {
    pub fn apply(&self, config: Configuration<T>) -> Configuration<T> {
        (self.f)(config)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<T> Clone for BeforeRunHook<T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T> fmt::Debug for BeforeRunHook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BeforeRunHook { .. }")
    }
}

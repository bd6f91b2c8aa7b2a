use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::data::{RequestOptions, Response};
use crate::error::BoxError;

/// Asynchronous transport abstraction.
///
/// A transport performs exactly one network call per invocation. It owns
/// everything below the options mapping: connection handling, wire format,
/// and turning bytes into a [`Response`].
///
/// An `Err` means the call itself failed (DNS, refused connection, an
/// exception inside a mock). HTTP error statuses are not errors: they come
/// back as `Ok` with [`Response::ok`] set to `false`.
///
/// # Implementations
///
/// - [`ReqwestTransport`](crate::ReqwestTransport): production implementation using `reqwest`
/// - [`MockTransport`](crate::MockTransport): canned responses for tests
/// - [`transport_fn`]: any async closure
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError>;
}

/// A transport shared between configurations.
pub type SharedTransport = Arc<dyn Transport>;

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError> {
        (**self).fetch(url, options).await
    }
}

/// A [`Transport`] backed by a closure. Built with [`transport_fn`].
#[derive(Clone)]
pub struct FnTransport<F> {
    f: F,
}

/// Use an async closure as a transport.
///
/// # Examples
///
/// ```
/// use chainfetch::{Configuration, Response, transport_fn};
///
/// let transport = transport_fn(|url: String, _options| async move {
///     Ok::<_, std::convert::Infallible>(Response::new(200, format!("fetched {url}")))
/// });
/// let config: Configuration = Configuration::with_transport(transport);
/// ```
pub fn transport_fn<F, Fut, E>(f: F) -> FnTransport<F>
where
    F: Fn(String, RequestOptions) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    FnTransport { f }
}

#[async_trait]
impl<F, Fut, E> Transport for FnTransport<F>
where
    F: Fn(String, RequestOptions) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError> {
        (self.f)(url.to_owned(), options.clone())
            .await
            .map_err(Into::into)
    }
}

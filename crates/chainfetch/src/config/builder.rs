use std::future::Future;
use std::sync::Arc;

use crate::config::Configuration;
use crate::config::handler::{BeforeRunHook, ConnectionHandler, ResponseHandler, StatusPatch};
use crate::config::value::{Patch, Value};
use crate::data::{RequestOptions, Response};
use crate::effects::Transport;
use crate::error::BoxError;

/// Convenience setters. Each one is a single [`Configuration::set`] or
/// [`Configuration::merge_set`] and returns a new configuration.
impl<T: Send + 'static> Configuration<T> {
    /// Replace the transport used by this configuration and its descendants.
    #[must_use]
    pub fn set_transport(&self, transport: impl Transport + 'static) -> Self {
        self.set(Value::Transport(Arc::new(transport)))
    }

    #[must_use]
    pub fn url(&self, url: impl Into<String>) -> Self {
        self.set(Value::Url(url.into()))
    }

    /// Shallow-merge `options` into the request options.
    ///
    /// A `null` entry removes the option, see [`RequestOptions::cleared`].
    #[must_use]
    pub fn request_options(&self, options: RequestOptions) -> Self {
        self.merge_set(Patch::RequestOptions(options))
    }

    /// Set the url and merge `options` in one step.
    #[must_use]
    pub fn request(&self, url: impl Into<String>, options: RequestOptions) -> Self {
        self.url(url).request_options(options)
    }

    /// Handler used when neither a status callback nor a success/error
    /// handler applies. Defaults to returning the response itself.
    #[must_use]
    pub fn on_response<F, Fut, E>(&self, f: F) -> Self
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.set(Value::OnResponse(ResponseHandler::new(f)))
    }

    /// Handler for responses with `ok == true`.
    #[must_use]
    pub fn on_success<F, Fut, E>(&self, f: F) -> Self
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.set(Value::OnSuccess(Some(ResponseHandler::new(f))))
    }

    /// Handler for responses with `ok == false`.
    #[must_use]
    pub fn on_error<F, Fut, E>(&self, f: F) -> Self
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.set(Value::OnError(Some(ResponseHandler::new(f))))
    }

    /// Same as [`Configuration::on_error`].
    #[must_use]
    pub fn on_error_response<F, Fut, E>(&self, f: F) -> Self
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.on_error(f)
    }

    /// Handler for one exact status code. Takes precedence over every other
    /// response handler.
    #[must_use]
    pub fn on_status<F, Fut, E>(&self, status: u16, f: F) -> Self
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.on_status_callbacks(StatusPatch::from([(status, Some(ResponseHandler::new(f)))]))
    }

    /// Remove the handler for `status`, if any.
    #[must_use]
    pub fn clear_status(&self, status: u16) -> Self {
        self.on_status_callbacks(StatusPatch::from([(status, None)]))
    }

    /// Merge several status handlers at once; `None` entries remove.
    #[must_use]
    pub fn on_status_callbacks(&self, callbacks: StatusPatch<T>) -> Self {
        self.merge_set(Patch::OnStatusCallbacks(callbacks))
    }

    /// Handler for transport failures. Without one, the failure is returned
    /// as [`Error::Connection`](crate::Error::Connection).
    #[must_use]
    pub fn on_connection_error<F, Fut, E>(&self, f: F) -> Self
    where
        F: Fn(BoxError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.set(Value::OnConnectionError(Some(ConnectionHandler::new(f))))
    }

    /// Rewrite the configuration right before each dispatch.
    ///
    /// The hook sees the fully layered configuration and whatever it
    /// returns is what gets dispatched.
    #[must_use]
    pub fn on_before_run<F>(&self, f: F) -> Self
    where
        F: Fn(Configuration<T>) -> Configuration<T> + Send + Sync + 'static,
    {
        self.set(Value::OnBeforeRun(BeforeRunHook::new(f)))
    }
}

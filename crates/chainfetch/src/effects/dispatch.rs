use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Configuration;
use crate::data::{RequestDescriptor, RequestOptions};
use crate::error::{Error, Result};
use crate::transform::{Route, encode_json_body};

const TARGET: &str = "chainfetch::dispatch";

/// Perform one request described by `config` and route the outcome.
///
/// 1. The `on_before_run` hook rewrites the configuration.
/// 2. Transport, url, options and every handler are resolved. A missing
///    value fails here, before anything is sent.
/// 3. A `json_body` option is encoded into `body` and a JSON content type.
/// 4. The transport is called exactly once.
/// 5. A response goes to exactly one handler: the status callback for its
///    status, else `on_success`/`on_error` depending on `ok`, else
///    `on_response`. A transport failure goes to `on_connection_error`, or
///    is returned as [`Error::Connection`] if none is set.
pub async fn dispatch<T: Send + 'static>(config: Configuration<T>) -> Result<T> {
    let config = config.before_run()?.apply(config);

    let transport = config.transport()?;
    let descriptor = describe_prepared(&config)?;
    let by_status = config.status_callbacks()?;
    let on_success = config.success_handler()?;
    let on_error = config.error_handler()?;
    let on_response = config.response_handler()?;
    let on_connection_error = config.connection_handler()?;

    debug!(
        target: TARGET,
        url = %descriptor.url,
        method = descriptor.options.method().unwrap_or("GET"),
        "sending request"
    );

    match transport.fetch(&descriptor.url, &descriptor.options).await {
        Ok(response) => {
            let route = Route {
                by_status: &by_status,
                on_success: on_success.as_ref(),
                on_error: on_error.as_ref(),
                on_response: &on_response,
            };
            let (slot, handler) = route.select(response.status(), response.ok());
            debug!(
                target: TARGET,
                url = %descriptor.url,
                status = response.status(),
                ok = response.ok(),
                %slot,
                "routing response"
            );

            let handler = handler.clone();
            handler.call(response).await.map_err(Error::Callback)
        }
        Err(error) => {
            warn!(target: TARGET, url = %descriptor.url, %error, "transport failed");

            match on_connection_error {
                Some(handler) => handler.call(error).await.map_err(Error::Callback),
                None => Err(Error::Connection(error)),
            }
        }
    }
}

fn describe_prepared<T>(config: &Configuration<T>) -> Result<RequestDescriptor> {
    let url = config.target_url()?;
    let options = encode_json_body(&config.options()?)?;
    Ok(RequestDescriptor::new(url, options))
}

impl<T: Send + 'static> Configuration<T> {
    /// Dispatch this configuration. See [`dispatch`] for the steps.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if the url or transport was never set
    /// - [`Error::Encoding`] if `json_body` cannot be serialized
    /// - [`Error::Connection`] if the transport failed without a handler
    /// - [`Error::Callback`] if the chosen handler failed
    pub async fn run(&self) -> Result<T> {
        dispatch(self.clone()).await
    }

    /// Set the url, merge `options`, and dispatch.
    pub async fn run_request(&self, url: impl Into<String>, options: RequestOptions) -> Result<T> {
        self.request(url, options).run().await
    }

    pub async fn get(&self, url: impl Into<String>) -> Result<T> {
        self.run_request(url, RequestOptions::new().with_method("GET"))
            .await
    }

    /// Dispatch a `POST` with `body` as the JSON payload.
    pub async fn post<B>(&self, url: impl Into<String>, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        let options = RequestOptions::new()
            .with_method("POST")
            .with_json_body(body)?;
        self.run_request(url, options).await
    }

    pub async fn put<B>(&self, url: impl Into<String>, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        let options = RequestOptions::new()
            .with_method("PUT")
            .with_json_body(body)?;
        self.run_request(url, options).await
    }

    pub async fn patch<B>(&self, url: impl Into<String>, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        let options = RequestOptions::new()
            .with_method("PATCH")
            .with_json_body(body)?;
        self.run_request(url, options).await
    }

    pub async fn delete(&self, url: impl Into<String>) -> Result<T> {
        self.run_request(url, RequestOptions::new().with_method("DELETE"))
            .await
    }

    /// The url and options the transport would receive, without sending.
    ///
    /// The `on_before_run` hook is applied and `json_body` is encoded, same
    /// as for [`Configuration::run`]. No transport is needed.
    pub fn describe(&self) -> Result<RequestDescriptor> {
        let config = self.before_run()?.apply(self.clone());
        describe_prepared(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Response;
    use crate::effects::MockTransport;
    use crate::error::BoxError;
    use std::sync::Arc;

    fn config_with(mock: &Arc<MockTransport>) -> Configuration {
        Configuration::with_transport(Arc::clone(mock))
    }

    #[tokio::test]
    async fn test_missing_url_fails_before_transport() {
        let mock = Arc::new(MockTransport::new().with_fallback(Response::new(200, "")));
        let config = config_with(&mock);

        let err = config.run().await.unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_transport() {
        let config: Configuration = Configuration::default().url("/x");

        let err = config.run().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Configuration {
                key: crate::data::Key::Transport
            }
        ));
    }

    #[tokio::test]
    async fn test_default_on_response_is_identity() {
        let mock = Arc::new(MockTransport::new().with_response("/ok", Response::new(201, "made")));

        let response = config_with(&mock).get("/ok").await.unwrap();

        assert_eq!(response.status(), 201);
        assert_eq!(response.text(), "made");
    }

    #[tokio::test]
    async fn test_callback_error_is_wrapped() {
        let mock = Arc::new(MockTransport::new().with_response("/", Response::new(200, "")));
        let config = config_with(&mock).on_success(|_response: Response| async {
            Err::<Response, BoxError>("E".into())
        });

        let err = config.get("/").await.unwrap_err();

        match err {
            Error::Callback(source) => assert_eq!(source.to_string(), "E"),
            other => panic!("expected callback error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_handler_error_is_wrapped() {
        let mock = Arc::new(MockTransport::new().with_failure("/", "X"));
        let config = config_with(&mock).on_connection_error(|_error: BoxError| async {
            Err::<Response, BoxError>("handler".into())
        });

        let err = config.get("/").await.unwrap_err();

        assert!(matches!(err, Error::Callback(source) if source.to_string() == "handler"));
    }

    #[tokio::test]
    async fn test_post_encodes_json_body() {
        let mock = Arc::new(MockTransport::new().with_fallback(Response::new(200, "")));

        config_with(&mock)
            .post("/items", &serde_json::json!({"a": 1}))
            .await
            .unwrap();

        let call = mock.last_call().unwrap();
        assert_eq!(call.url, "/items");
        assert_eq!(call.options.method(), Some("POST"));
        assert_eq!(call.options.body(), Some(r#"{"a":1}"#));
        assert!(call.options.json_body().is_none());
    }

    #[test]
    fn test_describe_applies_hook_and_encoding() {
        let config: Configuration = Configuration::default()
            .url("/a")
            .request_options(
                RequestOptions::new()
                    .with_json_body(&serde_json::json!([1, 2]))
                    .unwrap(),
            )
            .on_before_run(|config| config.url("/b"));

        let descriptor = config.describe().unwrap();

        assert_eq!(descriptor.url, "/b");
        assert_eq!(descriptor.options.body(), Some("[1,2]"));
    }
}

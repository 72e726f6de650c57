// ────────────────────────────────
// src/server/timeout.rs
// Bounds a whole request and substitutes a fixed response when it runs out.
// ────────────────────────────────
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Request, Response, StatusCode};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tower::timeout::{error::Elapsed, Timeout};
use tower::{BoxError, Layer, Service};
use tracing::warn;

/// Wraps a service in [`Timeout`] and turns the elapsed error into a
/// `503` carrying `message`. Dropping the inner future cancels whatever it
/// was doing, including running probes.
#[derive(Debug, Clone)]
pub struct TimeoutFallbackLayer {
    timeout: Duration,
    message: Arc<str>,
}

impl TimeoutFallbackLayer {
    pub fn new(timeout: Duration, message: impl Into<Arc<str>>) -> Self {
        Self {
            timeout,
            message: message.into(),
        }
    }
}

impl<S> Layer<S> for TimeoutFallbackLayer {
    type Service = TimeoutFallback<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutFallback {
            inner: Timeout::new(inner, self.timeout),
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeoutFallback<S> {
    inner: Timeout<S>,
    message: Arc<str>,
}

impl<S> Service<Request<Body>> for TimeoutFallback<S>
where
    S: Service<Request<Body>, Response = Response<Body>>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
{
    type Response = Response<Body>;
    type Error = BoxError;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let message = self.message.clone();
        let fut = self.inner.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(response) => Ok(response),
                Err(err) if err.is::<Elapsed>() => {
                    warn!("request timed out");
                    let response = Response::builder()
                        .status(StatusCode::SERVICE_UNAVAILABLE)
                        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                        .body(Body::from(message.to_string()))?;
                    Ok::<_, BoxError>(response)
                }
                Err(err) => Err(err),
            }
        })
    }
}

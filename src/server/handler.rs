// src/server/handler.rs
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Request, Response, StatusCode};
use std::sync::Arc;
use tower::{BoxError, Service};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::health::HealthChecker;

/// Answers every path and method with the current health report.
///
/// Health is signalled only through the body; the status is always 200.
#[derive(Clone)]
pub struct HealthHandler {
    checker: Arc<HealthChecker>,
}

impl HealthHandler {
    pub fn new(checker: Arc<HealthChecker>) -> Self {
        Self { checker }
    }
}

impl Service<Request<Body>> for HealthHandler {
    type Response = Response<Body>;
    type Error = BoxError;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let checker = self.checker.clone();
        let span = info_span!(
            "health_request",
            request_id = %Uuid::new_v4(),
            method = %req.method(),
            path = %req.uri().path(),
        );

        Box::pin(
            async move {
                let report = checker.check().await;
                info!(healthy = report.healthy, "health check served");

                let response = Response::builder()
                    .status(StatusCode::OK)
                    .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                    .body(Body::from(report.render()))?;
                Ok::<_, BoxError>(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeError, ProbeResult, ProbeRunner};
    use async_trait::async_trait;
    use hyper::Method;
    use tower::ServiceExt;

    struct FixedRunner {
        healthy: bool,
    }

    #[async_trait]
    impl ProbeRunner for FixedRunner {
        async fn run(&self, command: &str) -> ProbeResult {
            if command == "version" {
                return Ok("1.0.0".to_string());
            }
            if self.healthy {
                Ok(String::new())
            } else {
                Err(ProbeError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "pipe closed",
                )))
            }
        }
    }

    fn handler(healthy: bool) -> HealthHandler {
        let probes: Vec<String> = vec!["probe".to_string()];
        let checker = HealthChecker::new(Arc::new(FixedRunner { healthy }), probes.into(), "version");
        HealthHandler::new(Arc::new(checker))
    }

    async fn body_of(response: Response<Body>) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_healthy_response() {
        let req = Request::get("/").body(Body::empty()).unwrap();
        let response = handler(true).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_of(response).await, "healthy:true\nversion:1.0.0\n");
    }

    #[tokio::test]
    async fn test_unhealthy_response_is_still_200() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = handler(false).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_of(response).await,
            "healthy:false\nversion:1.0.0\n\nError: failed to collect command output: pipe closed"
        );
    }
}

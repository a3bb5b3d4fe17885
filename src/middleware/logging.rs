use std::time::Instant;

use axum::{
    body::Body,
    http::{Request, Response},
};
use tower::{Layer, Service};

use super::request_id::RequestId;

/// Per-request access log keyed by the correlation id, with the level
/// picked from the response class.
#[derive(Clone)]
pub struct RequestLogLayer;

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogService { inner }
    }
}

#[derive(Clone)]
pub struct RequestLogService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestLogService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(req).await?;
            let status = response.status();
            let duration_ms = start.elapsed().as_millis();

            if status.is_server_error() {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    uri = %uri,
                    status = %status,
                    duration_ms = %duration_ms,
                    "request failed"
                );
            } else if status.is_client_error() {
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    uri = %uri,
                    status = %status,
                    duration_ms = %duration_ms,
                    "request rejected"
                );
            } else {
                tracing::info!(
                    request_id = %request_id,
                    method = %method,
                    uri = %uri,
                    status = %status,
                    duration_ms = %duration_ms,
                    "request completed"
                );
            }

            Ok(response)
        })
    }
}

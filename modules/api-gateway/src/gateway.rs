use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use calc_bootstrap::ServerConfig;
use http::{HeaderName, StatusCode};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[must_use]
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Wraps module routers with the common middleware and serves them.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    config: ServerConfig,
}

impl ApiGateway {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Apply all middleware layers to a router.
    ///
    /// Layers are registered innermost first. At runtime requests flow
    /// outermost to innermost:
    /// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → `BodyLimit` → Router.
    #[must_use]
    pub fn apply_middleware_stack(&self, mut router: Router) -> Router {
        // 5) Body limit
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));
        router = router.layer(DefaultBodyLimit::max(self.config.body_limit_bytes));

        // 4) Timeout, 0 disables it
        if self.config.request_timeout_secs > 0 {
            router = router.layer(TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                Duration::from_secs(self.config.request_timeout_secs),
            ));
        }

        // 3) Trace
        router = Self::apply_trace_layer(router);

        // 2) PropagateRequestId (copies the id onto the response)
        router = router.layer(PropagateRequestIdLayer::new(request_id_header()));

        // 1) SetRequestId (registered last, runs first)
        router.layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
    }

    fn apply_trace_layer(router: Router) -> Router {
        use tracing::field::Empty;

        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    let rid = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        request_id = %rid,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                ),
        )
    }

    /// Binds `bind_addr` and serves until `shutdown` resolves.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn serve<F>(&self, router: Router, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
        self.serve_with_listener(listener, router, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// In-flight requests are allowed to finish before this returns.
    ///
    /// # Errors
    /// Returns an error if the server fails while accepting connections.
    pub async fn serve_with_listener<F>(
        &self,
        listener: TcpListener,
        router: Router,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        let router = self.apply_middleware_stack(router);
        tracing::info!("HTTP server bound on {}", local);

        let shutdown = async move {
            shutdown.await;
            tracing::info!("HTTP server shutting down gracefully");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header::CONTENT_TYPE, Method as HttpMethod, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use futures::stream;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use tracing::info;

use crate::entities::{GatewayResponse, Method, RawRequest};
use crate::error::GatewayError;
use crate::use_cases::ports::{Executor, Server};
use crate::use_cases::Pipeline;

const LIVENESS_BODY: &str = "OK";

/// Axum-based HTTP server implementation
#[derive(Clone)]
pub struct Axum {
    addr: SocketAddr,
}

impl Axum {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub fn bind(addr: impl Into<SocketAddr>) -> Self {
        Self::new(addr.into())
    }
}

impl Default for Axum {
    fn default() -> Self {
        Self::new(([127, 0, 0, 1], 0).into())
    }
}

/// Routes of the gateway: a liveness probe on `/` and the GraphQL endpoint.
///
/// `/graphql` accepts every method so that unsupported ones get a JSON error
/// from the pipeline instead of an empty 405.
pub fn router<E: Executor>(pipeline: Pipeline<E>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/graphql", any(handle_graphql::<E>))
        .with_state(pipeline)
}

async fn liveness() -> &'static str {
    LIVENESS_BODY
}

async fn handle_graphql<E: Executor>(
    State(pipeline): State<Pipeline<E>>,
    method: HttpMethod,
    uri: Uri,
    body: Bytes,
) -> Response {
    let request = RawRequest::new(Method::from(method.as_str()), uri.path())
        .with_query_string(uri.query().unwrap_or_default())
        .with_body(body.to_vec());
    into_axum_response(pipeline.handle(request).await)
}

fn into_axum_response(response: GatewayResponse) -> Response {
    let GatewayResponse {
        status,
        content_type,
        body,
        chunked,
    } = response;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = if chunked {
        Body::from_stream(stream::once(async move {
            Ok::<_, Infallible>(Bytes::from(body))
        }))
    } else {
        Body::from(body)
    };

    let mut builder = axum::http::Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[async_trait]
impl Server for Axum {
    async fn run<E, F, S>(
        &self,
        pipeline: Pipeline<E>,
        on_ready: Option<F>,
        shutdown: S,
    ) -> Result<(), GatewayError>
    where
        E: Executor,
        F: FnOnce(SocketAddr) + Send + 'static,
        S: Future<Output = ()> + Send + 'static,
    {
        let app = router(pipeline);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| GatewayError::ServerError(e.to_string()))?;

        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::ServerError(e.to_string()))?;
        info!(%addr, "GraphQL gateway listening");

        if let Some(callback) = on_ready {
            callback(addr);
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::ServerError(e.to_string()))?;

        info!("GraphQL gateway stopped");
        Ok(())
    }
}

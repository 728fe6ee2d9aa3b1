use async_trait::async_trait;
use std::future::Future;
use std::net::SocketAddr;

use super::Executor;
use crate::error::GatewayError;
use crate::use_cases::Pipeline;

/// Trait for HTTP server implementations hosting the gateway
#[async_trait]
pub trait Server: Send + Sync + Clone {
    /// Serve `pipeline` until `shutdown` resolves
    async fn run<E, F, S>(
        &self,
        pipeline: Pipeline<E>,
        on_ready: Option<F>,
        shutdown: S,
    ) -> Result<(), GatewayError>
    where
        E: Executor,
        F: FnOnce(SocketAddr) + Send + 'static,
        S: Future<Output = ()> + Send + 'static;
}

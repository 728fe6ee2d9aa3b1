use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{GraphQLRequest, GraphQLResponse};
use crate::error::EngineError;

/// Port to the GraphQL execution engine.
///
/// Implementations hold an immutable schema built once at startup and are
/// shared read-only between concurrent requests. GraphQL-level problems
/// (syntax, validation, resolver errors) belong in the returned
/// [`GraphQLResponse::errors`]; `Err` is reserved for failures of the
/// engine itself.
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, EngineError>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for Arc<E> {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, EngineError> {
        (**self).execute(request).await
    }
}

#[cfg(feature = "async-graphql")]
mod async_graphql;
#[cfg(feature = "axum")]
mod axum;

#[cfg(feature = "async-graphql")]
pub use self::async_graphql::{build_schema, AsyncGraphQL, GatewaySchema, QueryRoot};
#[cfg(feature = "axum")]
pub use self::axum::{router, Axum};

//! GraphQL HTTP Gateway
//!
//! Decodes GraphQL requests sent as GET query parameters or as a POST JSON
//! body, runs them on a static schema and writes a GraphQL JSON response.
//! Malformed requests get a `400` with `{"error": {"message": ...}}`;
//! GraphQL errors are reported inside a `200` response.
//!
//! # Example
//!
//! ```rust,no_run
//! use graphql_http_gateway::prelude::*;
//! use std::net::SocketAddr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GatewayError> {
//!     let pipeline = Pipeline::new(AsyncGraphQL::new(build_schema()));
//!
//!     Axum::bind(([127, 0, 0, 1], 8080))
//!         .run(
//!             pipeline,
//!             Some(|addr: SocketAddr| println!("listening on {addr}")),
//!             async {
//!                 let _ = tokio::signal::ctrl_c().await;
//!             },
//!         )
//!         .await
//! }
//! ```

mod adapters;
pub mod config;
pub mod entities;
pub mod error;
pub mod use_cases;

pub use error::GatewayError;

#[cfg(feature = "async-graphql")]
pub use adapters::gateways::{build_schema, AsyncGraphQL, GatewaySchema, QueryRoot};
#[cfg(feature = "axum")]
pub use adapters::gateways::{router, Axum};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::entities::{
        GatewayResponse, GraphQLError, GraphQLRequest, GraphQLResponse, Method, QueryParams,
        RawRequest, Variables,
    };
    pub use crate::error::{DecodeError, EngineError, Failure, GatewayError, ValidationError};
    pub use crate::use_cases::ports::{Executor, Server};
    pub use crate::use_cases::{decode_request, Pipeline};
    pub use serde_json::json;

    #[cfg(feature = "async-graphql")]
    pub use crate::{build_schema, AsyncGraphQL};
    #[cfg(feature = "axum")]
    pub use crate::Axum;
}

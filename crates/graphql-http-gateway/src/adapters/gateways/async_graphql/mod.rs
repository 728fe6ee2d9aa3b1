mod executor;
mod schema;

pub use executor::AsyncGraphQL;
pub use schema::{build_schema, GatewaySchema, QueryRoot};

mod gateway_response;
mod graphql_request;
mod graphql_response;
mod method;
mod raw_request;

pub use gateway_response::{GatewayResponse, JSON_CONTENT_TYPE};
pub use graphql_request::{GraphQLRequest, Variables};
pub use graphql_response::{GraphQLError, GraphQLResponse, Location};
pub use method::Method;
pub use raw_request::{QueryParams, RawRequest};

use async_graphql::{ObjectType, PathSegment, Schema, ServerError, SubscriptionType};
use async_trait::async_trait;

use crate::entities::{GraphQLError, GraphQLRequest, GraphQLResponse};
use crate::error::EngineError;
use crate::use_cases::ports::Executor;

/// [`Executor`] backed by an `async-graphql` schema
pub struct AsyncGraphQL<Query, Mutation, Subscription> {
    schema: Schema<Query, Mutation, Subscription>,
}

impl<Query, Mutation, Subscription> AsyncGraphQL<Query, Mutation, Subscription> {
    pub fn new(schema: Schema<Query, Mutation, Subscription>) -> Self {
        Self { schema }
    }
}

/// Build the engine request, leaving out the optional parts the client did not send
fn to_engine_request(request: GraphQLRequest) -> async_graphql::Request {
    let (query, operation_name, variables) = request.into_parts();
    let mut engine_request = async_graphql::Request::new(query);
    if let Some(name) = operation_name {
        engine_request = engine_request.operation_name(name);
    }
    if let Some(variables) = variables {
        engine_request = engine_request.variables(async_graphql::Variables::from_json(
            serde_json::Value::Object(variables),
        ));
    }
    engine_request
}

fn to_graphql_error(error: ServerError) -> Result<GraphQLError, EngineError> {
    let mut converted = GraphQLError::new(error.message);
    for pos in error.locations {
        converted = converted.with_location(pos.line, pos.column);
    }
    if !error.path.is_empty() {
        let path = error
            .path
            .into_iter()
            .map(|segment| match segment {
                PathSegment::Field(name) => serde_json::Value::String(name),
                PathSegment::Index(index) => serde_json::Value::from(index),
            })
            .collect();
        converted = converted.with_path(path);
    }
    if let Some(extensions) = error.extensions {
        let extensions = serde_json::to_value(extensions)
            .map_err(|e| EngineError::Conversion(e.to_string()))?;
        if extensions.as_object().is_some_and(|map| !map.is_empty()) {
            converted = converted.with_extensions(extensions);
        }
    }
    Ok(converted)
}

fn from_engine_response(
    response: async_graphql::Response,
) -> Result<GraphQLResponse, EngineError> {
    let errors = response
        .errors
        .into_iter()
        .map(to_graphql_error)
        .collect::<Result<Vec<_>, _>>()?;
    let data = response
        .data
        .into_json()
        .map_err(|e| EngineError::Conversion(e.to_string()))?;

    // Requests rejected before execution carry no data at all. Once execution
    // started, field errors carry a path and `data` stays, even as null.
    let executed = errors.iter().any(|error| error.path.is_some());
    if data.is_null() && !errors.is_empty() && !executed {
        return Ok(GraphQLResponse::from_errors(errors));
    }
    let mut converted = GraphQLResponse::new(data);
    for error in errors {
        converted = converted.with_error(error);
    }
    Ok(converted)
}

#[async_trait]
impl<Query, Mutation, Subscription> Executor for AsyncGraphQL<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, EngineError> {
        let response = self.schema.execute(to_engine_request(request)).await;
        from_engine_response(response)
    }
}

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};

/// Root query type of the gateway's static schema
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn hello(&self) -> Option<String> {
        Some("world".to_string())
    }

    /// Greets `name`, or the world when no name is given
    async fn greet(&self, name: Option<String>) -> String {
        format!("Hello, {}!", name.as_deref().unwrap_or("world"))
    }
}

pub type GatewaySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema. Called once at startup; the result is shared read-only.
pub fn build_schema() -> GatewaySchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription).finish()
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Variables of a GraphQL request, keyed by variable name
pub type Variables = Map<String, Value>;

/// A normalized GraphQL request, independent of the HTTP transport it arrived on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    query: String,
    #[serde(
        rename = "operationName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variables: Option<Variables>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    pub fn variables(&self) -> Option<&Variables> {
        self.variables.as_ref()
    }

    /// Get a variable by name
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.as_ref().and_then(|v| v.get(name))
    }

    pub fn into_parts(self) -> (String, Option<String>, Option<Variables>) {
        (self.query, self.operation_name, self.variables)
    }

    /// Structural checks that hold for every request handed to the engine.
    ///
    /// The query must contain something other than whitespace and the
    /// operation name, when given, must be a GraphQL `Name`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.query.trim().is_empty() {
            return Err(ValidationError::new("GraphQL query must not be blank"));
        }
        if let Some(name) = &self.operation_name {
            if !is_graphql_name(name) {
                return Err(ValidationError::new(format!(
                    "Invalid operation name: {:?}",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_graphql_request_new() {
        let req = GraphQLRequest::new("{ hello }");
        assert_eq!(req.query(), "{ hello }");
        assert!(req.operation_name().is_none());
        assert!(req.variables().is_none());
    }

    #[test]
    fn test_graphql_request_with_operation_name() {
        let req = GraphQLRequest::new("query Hello { hello }").with_operation_name("Hello");
        assert_eq!(req.operation_name(), Some("Hello"));
    }

    #[test]
    fn test_graphql_request_with_variables() {
        let mut vars = Variables::new();
        vars.insert("name".to_string(), json!("Ada"));
        let req = GraphQLRequest::new("query ($name: String) { greet(name: $name) }")
            .with_variables(vars);
        assert_eq!(req.get_variable("name"), Some(&json!("Ada")));
        assert_eq!(req.get_variable("missing"), None);
    }

    #[test]
    fn test_graphql_request_deserialize_camel_case() {
        let req: GraphQLRequest = serde_json::from_value(json!({
            "query": "query Q { hello }",
            "operationName": "Q",
            "variables": {"a": 1}
        }))
        .unwrap();
        assert_eq!(req.operation_name(), Some("Q"));
        assert_eq!(req.get_variable("a"), Some(&json!(1)));
    }

    #[test]
    fn test_graphql_request_null_optionals_are_absent() {
        let req: GraphQLRequest = serde_json::from_value(json!({
            "query": "{ hello }",
            "operationName": null,
            "variables": null
        }))
        .unwrap();
        assert_eq!(req, GraphQLRequest::new("{ hello }"));
    }

    #[test]
    fn test_graphql_request_serialize_skips_absent_fields() {
        let value = serde_json::to_value(GraphQLRequest::new("{ hello }")).unwrap();
        assert_eq!(value, json!({"query": "{ hello }"}));
    }

    #[test]
    fn test_validate_accepts_plain_query() {
        assert!(GraphQLRequest::new("{ hello }").validate().is_ok());
        assert!(GraphQLRequest::new("query _Op1 { hello }")
            .with_operation_name("_Op1")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_query() {
        let err = GraphQLRequest::new("  \n\t ").validate().unwrap_err();
        assert_eq!(err.message, "GraphQL query must not be blank");
    }

    #[test]
    fn test_validate_rejects_bad_operation_name() {
        for name in ["1Op", "my-op", "op name", ""] {
            let req = GraphQLRequest::new("{ hello }").with_operation_name(name);
            assert!(req.validate().is_err(), "{name:?} should be rejected");
        }
    }
}

use tracing::debug;

use crate::entities::{GraphQLRequest, Method, QueryParams, RawRequest, Variables};
use crate::error::DecodeError;

pub const QUERY_PARAM: &str = "query";
pub const OPERATION_NAME_PARAM: &str = "operationName";
pub const VARIABLES_PARAM: &str = "variables";

/// Decode a [`RawRequest`] into a [`GraphQLRequest`].
///
/// The query string is only decoded for GET, the one method that reads it.
pub fn decode_raw_request(request: &RawRequest) -> Result<GraphQLRequest, DecodeError> {
    let params = match request.method {
        Method::Get => request.query_params()?,
        _ => QueryParams::default(),
    };
    decode_request(&request.method, &request.body, &params)
}

/// Turn the transport encoding of a GraphQL request into a [`GraphQLRequest`].
///
/// POST requests carry a JSON body, GET requests carry query parameters. Any
/// other method yields [`DecodeError::UnsupportedMethod`].
pub fn decode_request(
    method: &Method,
    body: &[u8],
    params: &QueryParams,
) -> Result<GraphQLRequest, DecodeError> {
    let request = match method {
        Method::Post => decode_post_body(body)?,
        Method::Get => decode_get_params(params)?,
        other => return Err(DecodeError::UnsupportedMethod(other.clone())),
    };
    debug!(
        method = %method,
        operation_name = request.operation_name(),
        has_variables = request.variables().is_some(),
        "decoded GraphQL request"
    );
    Ok(request)
}

fn decode_post_body(body: &[u8]) -> Result<GraphQLRequest, DecodeError> {
    let request: GraphQLRequest =
        serde_json::from_slice(body).map_err(|e| DecodeError::MalformedBody(e.to_string()))?;
    if request.query().is_empty() {
        return Err(DecodeError::MissingQuery);
    }
    // An empty operationName means "not provided", as it does for GET
    if request.operation_name() == Some("") {
        let (query, _, variables) = request.into_parts();
        let request = GraphQLRequest::new(query);
        return Ok(match variables {
            Some(variables) => request.with_variables(variables),
            None => request,
        });
    }
    Ok(request)
}

fn decode_get_params(params: &QueryParams) -> Result<GraphQLRequest, DecodeError> {
    let query = params
        .get_non_empty(QUERY_PARAM)
        .ok_or(DecodeError::MissingQuery)?;
    let mut request = GraphQLRequest::new(query);

    if let Some(name) = params.get_non_empty(OPERATION_NAME_PARAM) {
        request = request.with_operation_name(name);
    }

    if let Some(raw) = params.get_non_empty(VARIABLES_PARAM) {
        let variables: Variables = serde_json::from_str(raw)
            .map_err(|e| DecodeError::MalformedVariables(e.to_string()))?;
        request = request.with_variables(variables);
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(body: &str) -> Result<GraphQLRequest, DecodeError> {
        decode_request(&Method::Post, body.as_bytes(), &QueryParams::default())
    }

    fn get(query_string: &str) -> Result<GraphQLRequest, DecodeError> {
        decode_request(&Method::Get, &[], &QueryParams::parse(query_string).unwrap())
    }

    #[test]
    fn test_post_query_only() {
        let req = post(r#"{"query":"{ hello }"}"#).unwrap();
        assert_eq!(req, GraphQLRequest::new("{ hello }"));
    }

    #[test]
    fn test_post_query_round_trips_unchanged() {
        let queries = [
            "{ hello }",
            "query Q($n: String) {\n  greet(name: $n)\n}",
            "  { hello }  ",
            "{ greet(name: \"\\u00e9t\u{e9}\") }",
        ];
        for query in queries {
            let body = serde_json::to_string(&json!({ "query": query })).unwrap();
            assert_eq!(post(&body).unwrap().query(), query);
        }
    }

    #[test]
    fn test_post_all_fields() {
        let req = post(
            r#"{"query":"query Greet($name: String) { greet(name: $name) }","operationName":"Greet","variables":{"name":"Ada","n":[1,2]}}"#,
        )
        .unwrap();
        assert_eq!(req.operation_name(), Some("Greet"));
        assert_eq!(req.get_variable("name"), Some(&json!("Ada")));
        assert_eq!(req.get_variable("n"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_post_is_idempotent() {
        let body = r#"{"query":"{ hello }","variables":{"a":{"b":true}}}"#;
        assert_eq!(post(body).unwrap(), post(body).unwrap());
    }

    #[test]
    fn test_post_ignores_query_params() {
        let params = QueryParams::parse("query=%7B%20other%20%7D").unwrap();
        let req = decode_request(&Method::Post, br#"{"query":"{ hello }"}"#, &params).unwrap();
        assert_eq!(req.query(), "{ hello }");
    }

    #[test]
    fn test_post_missing_query_is_malformed_body() {
        assert!(matches!(post("{}"), Err(DecodeError::MalformedBody(_))));
    }

    #[test]
    fn test_post_empty_query_is_missing() {
        assert_eq!(post(r#"{"query":""}"#), Err(DecodeError::MissingQuery));
    }

    #[test]
    fn test_post_empty_operation_name_is_absent() {
        let req = post(r#"{"query":"{ hello }","operationName":"","variables":{"a":1}}"#).unwrap();
        assert_eq!(req.operation_name(), None);
        assert_eq!(req.get_variable("a"), Some(&json!(1)));
        assert!(req.validate().is_ok());

        let get_req = get("query=%7B%20hello%20%7D&operationName=").unwrap();
        let post_req = post(r#"{"query":"{ hello }","operationName":""}"#).unwrap();
        assert_eq!(get_req, post_req);
    }

    #[test]
    fn test_post_invalid_json() {
        assert!(matches!(post("{query"), Err(DecodeError::MalformedBody(_))));
        assert!(matches!(post(""), Err(DecodeError::MalformedBody(_))));
    }

    #[test]
    fn test_post_shape_mismatch() {
        assert!(matches!(post(r#"{"query":42}"#), Err(DecodeError::MalformedBody(_))));
        assert!(matches!(
            post(r#"{"query":"{ hello }","variables":[1]}"#),
            Err(DecodeError::MalformedBody(_))
        ));
        assert!(matches!(post("[]"), Err(DecodeError::MalformedBody(_))));
    }

    #[test]
    fn test_get_query_only() {
        let req = get("query=%7B%20hello%20%7D").unwrap();
        assert_eq!(req, GraphQLRequest::new("{ hello }"));
    }

    #[test]
    fn test_get_all_params() {
        let req = get(
            "query=query%20G(%24n%3A%20String)%20%7B%20greet(name%3A%20%24n)%20%7D&operationName=G&variables=%7B%22n%22%3A%22Ada%22%7D",
        )
        .unwrap();
        assert_eq!(req.query(), "query G($n: String) { greet(name: $n) }");
        assert_eq!(req.operation_name(), Some("G"));
        assert_eq!(req.get_variable("n"), Some(&json!("Ada")));
    }

    #[test]
    fn test_get_missing_query() {
        assert_eq!(get(""), Err(DecodeError::MissingQuery));
        assert_eq!(get("operationName=Q"), Err(DecodeError::MissingQuery));
    }

    #[test]
    fn test_get_empty_query() {
        assert_eq!(get("query="), Err(DecodeError::MissingQuery));
    }

    #[test]
    fn test_get_empty_optionals_are_absent() {
        let req = get("query=%7Bhello%7D&operationName=&variables=").unwrap();
        assert!(req.operation_name().is_none());
        assert!(req.variables().is_none());
    }

    #[test]
    fn test_get_malformed_variables() {
        assert!(matches!(
            get("query=%7Bhello%7D&variables=%7Bnotjson%7D"),
            Err(DecodeError::MalformedVariables(_))
        ));
    }

    #[test]
    fn test_get_variables_must_be_object() {
        for vars in ["%5B1%5D", "42", "null", "%22s%22"] {
            let result = get(&format!("query=%7Bhello%7D&variables={vars}"));
            assert!(
                matches!(result, Err(DecodeError::MalformedVariables(_))),
                "{vars} should be rejected"
            );
        }
    }

    #[test]
    fn test_unsupported_methods() {
        for method in [Method::Put, Method::Delete, Method::Patch, Method::Options] {
            let body = br#"{"query":"{ hello }"}"#;
            let result = decode_request(&method, body, &QueryParams::default());
            assert_eq!(result, Err(DecodeError::UnsupportedMethod(method)));
        }
    }

    #[test]
    fn test_decode_raw_request() {
        let raw = RawRequest::new(Method::Get, "/graphql").with_query_string("query=%7Bhello%7D");
        assert_eq!(decode_raw_request(&raw).unwrap().query(), "{hello}");
    }

    #[test]
    fn test_get_invalid_utf8_query_string_is_rejected() {
        let raw = RawRequest::new(Method::Get, "/graphql")
            .with_query_string("query=%7B%20hello%20%7D%FF");
        assert!(matches!(
            decode_raw_request(&raw),
            Err(DecodeError::MalformedQueryString(_))
        ));
    }

    #[test]
    fn test_post_ignores_undecodable_query_string() {
        let raw = RawRequest::new(Method::Post, "/graphql")
            .with_query_string("junk=%FF")
            .with_body(r#"{"query":"{ hello }"}"#);
        assert_eq!(decode_raw_request(&raw).unwrap().query(), "{ hello }");
    }
}

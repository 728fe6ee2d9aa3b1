use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::collections::HashMap;

use super::Method;
use crate::error::DecodeError;

/// Decoded query string parameters. The first occurrence of a repeated key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Parse an `application/x-www-form-urlencoded` query string (without the leading `?`).
    ///
    /// Keys and values must decode to valid UTF-8.
    pub fn parse(query_string: &str) -> Result<Self, DecodeError> {
        let mut params = HashMap::new();
        for pair in query_string.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key)?;
            let value = decode_component(value)?;
            params.entry(key).or_insert(value);
        }
        Ok(Self(params))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Like [`QueryParams::get`], but an empty value counts as not provided
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

fn decode_component(raw: &str) -> Result<String, DecodeError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|e| DecodeError::MalformedQueryString(e.to_string()))
}

/// An HTTP request as received by the gateway, before any GraphQL decoding
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    pub path: String,
    /// Raw query string without the leading `?`, decoded on demand
    pub query_string: String,
    pub body: Vec<u8>,
}

impl RawRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_string: String::new(),
            body: Vec::new(),
        }
    }

    pub fn with_query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = query_string.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn query_params(&self) -> Result<QueryParams, DecodeError> {
        QueryParams::parse(&self.query_string)
    }
}

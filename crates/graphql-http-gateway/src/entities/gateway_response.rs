pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A finalized HTTP response produced by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    /// Sent with chunked transfer encoding instead of a content length
    pub chunked: bool,
}

impl GatewayResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            chunked: false,
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn with_json_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.content_type = Some(JSON_CONTENT_TYPE);
        self.body = body.into();
        self
    }

    pub fn chunked(mut self) -> Self {
        self.chunked = true;
        self
    }

    pub fn body_as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    pub fn body_as_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::error::GatewayError;

/// Runtime configuration, read from command line flags or the environment
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "graphql-http-gateway",
    version,
    about = "HTTP gateway serving GraphQL over GET and POST"
)]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to
    #[arg(short, long, env = "HTTP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Upper bound for executing a single GraphQL request, in seconds
    #[arg(long, env = "GATEWAY_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Log filter directives, e.g. `info` or `graphql_http_gateway=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.request_timeout_secs == 0 {
            return Err(GatewayError::ConfigurationError(
                "request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

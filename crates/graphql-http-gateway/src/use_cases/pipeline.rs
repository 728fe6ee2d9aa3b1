use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info_span, warn, Instrument};

use crate::entities::{GatewayResponse, GraphQLRequest, RawRequest};
use crate::error::{ExecutionOutcome, Failure};
use crate::use_cases::decode_raw_request;
use crate::use_cases::ports::Executor;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const FALLBACK_ERROR_BODY: &[u8] = br#"{"error":{"message":"Internal server error"}}"#;

/// Stages of a pipeline run, in the order they are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Switch the response to chunked transfer
    Init,
    /// Decode the HTTP request and run it on the engine
    Execute,
    /// Turn the recorded failure into an error payload
    Fail,
    /// Terminate the response
    Finalize,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorMessage<'a>,
}

#[derive(Serialize)]
struct ErrorMessage<'a> {
    message: &'a str,
}

/// Response under construction; the body can be written once
#[derive(Debug, Default)]
struct ResponseWriter {
    chunked: bool,
    written: Option<(u16, Vec<u8>)>,
}

impl ResponseWriter {
    fn write_json(&mut self, status: u16, body: Vec<u8>) -> bool {
        if let Some((previous, _)) = &self.written {
            warn!(
                status,
                previous = *previous,
                "response body already written, dropping second payload"
            );
            return false;
        }
        self.written = Some((status, body));
        true
    }

    fn end(self) -> GatewayResponse {
        let (status, body) = self.written.unwrap_or_else(|| {
            error!("pipeline finished without writing a response");
            (500, FALLBACK_ERROR_BODY.to_vec())
        });
        let response = GatewayResponse::new(status).with_json_body(body);
        if self.chunked {
            response.chunked()
        } else {
            response
        }
    }
}

/// Per-request state threaded through the stages
struct Context {
    request: RawRequest,
    failure: Option<Failure>,
    response: ResponseWriter,
    trail: Vec<Stage>,
}

impl Context {
    fn new(request: RawRequest) -> Self {
        Self {
            request,
            failure: None,
            response: ResponseWriter::default(),
            trail: Vec::with_capacity(4),
        }
    }

    /// Consumes the context, so a response can only be terminated once
    fn finalize(self) -> GatewayResponse {
        self.response.end()
    }
}

/// The request pipeline: Init, Execute, Fail (only after a failure), Finalize.
///
/// Cloning is cheap; clones share the executor.
pub struct Pipeline<E> {
    executor: Arc<E>,
    timeout: Duration,
}

impl<E> Clone for Pipeline<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            timeout: self.timeout,
        }
    }
}

impl<E: Executor> Pipeline<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor: Arc::new(executor),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one HTTP request through every stage and return the terminated response
    pub async fn handle(&self, request: RawRequest) -> GatewayResponse {
        let span = info_span!(
            "graphql_request",
            method = %request.method,
            path = %request.path
        );
        async move {
            let mut ctx = Context::new(request);
            self.drive(&mut ctx).await;
            let response = ctx.finalize();
            debug!(status = response.status, "response finalized");
            response
        }
        .instrument(span)
        .await
    }

    /// Advance through the stages until Finalize is reached
    async fn drive(&self, ctx: &mut Context) {
        let mut stage = Stage::Init;
        loop {
            ctx.trail.push(stage);
            debug!(?stage, "entering stage");
            stage = match stage {
                Stage::Init => init(ctx),
                Stage::Execute => self.decode_and_execute(ctx).await,
                Stage::Fail => fail(ctx),
                Stage::Finalize => return,
            };
        }
    }

    async fn decode_and_execute(&self, ctx: &mut Context) -> Stage {
        let decoded = decode_raw_request(&ctx.request)
            .map_err(Failure::from)
            .and_then(|request| -> Result<GraphQLRequest, Failure> {
                request.validate()?;
                Ok(request)
            });

        let request = match decoded {
            Ok(request) => request,
            Err(failure) => {
                warn!(%failure, "rejecting GraphQL request");
                ctx.failure = Some(failure);
                return Stage::Fail;
            }
        };

        let body = self
            .execute(request)
            .await
            .and_then(|response| Ok(serde_json::to_vec_pretty(&response)?));

        match body {
            Ok(body) => {
                ctx.response.write_json(200, body);
                Stage::Finalize
            }
            Err(failure) => {
                ctx.failure = Some(failure);
                Stage::Fail
            }
        }
    }

    /// Hand a decoded request to the engine.
    ///
    /// Engine failures, panics and timeouts come back as [`Failure`]s; GraphQL
    /// errors stay inside the response payload.
    pub async fn execute(&self, request: GraphQLRequest) -> ExecutionOutcome {
        let execution = AssertUnwindSafe(self.executor.execute(request)).catch_unwind();
        match tokio::time::timeout(self.timeout, execution).await {
            Ok(Ok(result)) => result.map_err(Failure::from),
            Ok(Err(panic)) => Err(Failure::internal(panic_message(&*panic))),
            Err(_) => Err(Failure::Timeout(self.timeout)),
        }
    }
}

fn init(ctx: &mut Context) -> Stage {
    ctx.response.chunked = true;
    Stage::Execute
}

fn fail(ctx: &mut Context) -> Stage {
    let Some(failure) = ctx.failure.as_ref() else {
        return Stage::Finalize;
    };
    if let Failure::Internal { detail } = failure {
        error!(%detail, "GraphQL request failed");
    }

    let message = failure.to_string();
    let body = serde_json::to_vec_pretty(&ErrorBody {
        error: ErrorMessage { message: &message },
    })
    .unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_vec());
    ctx.response.write_json(failure.status(), body);
    Stage::Finalize
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("executor panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("executor panicked: {message}")
    } else {
        "executor panicked".to_string()
    }
}

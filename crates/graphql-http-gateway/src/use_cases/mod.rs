mod decode_request;
mod pipeline;
pub mod ports;

pub use decode_request::{
    decode_raw_request, decode_request, OPERATION_NAME_PARAM, QUERY_PARAM, VARIABLES_PARAM,
};
pub use pipeline::{Pipeline, Stage, DEFAULT_REQUEST_TIMEOUT};

mod server;

pub use server::{router, Axum};

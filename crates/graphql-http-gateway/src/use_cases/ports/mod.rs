mod executor;
mod server;

pub use executor::Executor;
pub use server::Server;

//! ballast-core: fixed-response HTTP benchmark server
//!
//! The server answers every request with one pre-rendered payload,
//! so a load generator measures transport throughput rather than
//! application logic. Optionally holds a large heap ballast to give
//! the process a realistic resident set while serving.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod ballast;
pub mod config;
pub mod error;
pub mod payload;
pub mod server;

// Re-exports
pub use ballast::HeapBallast;
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use payload::FixedPayload;
pub use server::Server;

//! ballast: fixed-response HTTP benchmark server
//!
//! Usage: `ballast [config.yaml]`
//!
//! With no config file the server runs the classic benchmark setup:
//! "Hello" served as application/json on port 80, one accept loop per
//! core. The config file can change the port, body, worker count, and
//! the optional heap ballast size.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ballast_core::{config, HeapBallast, Result, Server, ServerConfig};

// Use mimalloc for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path)?,
        None => ServerConfig::default(),
    };

    // Held until process exit
    let ballast = HeapBallast::allocate(cfg.ballast_bytes);
    if let Some(ballast) = &ballast {
        tracing::info!(bytes = ballast.len(), "heap ballast allocated");
    }

    let server = Server::bind(&cfg)?;
    tracing::info!(
        addr = %server.local_addr(),
        workers = server.workers(),
        "serving fixed response"
    );

    server.serve().await
}

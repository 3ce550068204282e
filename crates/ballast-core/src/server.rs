//! HTTP responder
//!
//! High-performance serving loop using hyper with:
//! - Multi-threaded tokio runtime
//! - SO_REUSEPORT so the kernel load-balances accepts across workers
//! - TCP_NODELAY for low latency
//!
//! Every request, whatever its method, path, or headers, receives the
//! same pre-rendered payload. Handlers share no mutable state.

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::payload::FixedPayload;

/// Create a TCP listener with optimizations
pub fn bind_listener(addr: &SocketAddr) -> std::io::Result<std::net::TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // SO_REUSEADDR - allow binding to address in TIME_WAIT
    socket.set_reuse_address(true)?;

    // SO_REUSEPORT - enable kernel load balancing across accept loops
    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    // TCP_NODELAY - disable Nagle's algorithm for lower latency
    socket.set_nodelay(true)?;

    // Bind
    socket.bind(&(*addr).into())?;

    // Listen with backlog
    socket.listen(1024)?;

    // tokio requires non-blocking listeners
    socket.set_nonblocking(true)?;

    Ok(socket.into())
}

/// The responder: tuned worker listeners plus the payload they serve
pub struct Server {
    listeners: Vec<std::net::TcpListener>,
    payload: Arc<FixedPayload>,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind all worker listeners described by the config
    ///
    /// Port 0 resolves to a kernel-chosen ephemeral port; the remaining
    /// workers bind the resolved address so they all share one port.
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let payload = Arc::new(FixedPayload::from_config(config)?);

        let requested = format!("{}:{}", config.hostname, config.port);
        let addr: SocketAddr = requested.parse().map_err(|e: std::net::AddrParseError| {
            Error::InvalidAddress {
                addr: requested.clone(),
                reason: e.to_string(),
            }
        })?;

        // Without SO_REUSEPORT a second bind on the same address fails,
        // so non-unix targets collapse to a single accept loop.
        let workers = if cfg!(unix) {
            config.effective_workers()
        } else {
            1
        };

        let first = bind_listener(&addr)?;
        let local_addr = first.local_addr()?;

        let mut listeners = Vec::with_capacity(workers);
        listeners.push(first);
        for _ in 1..workers {
            listeners.push(bind_listener(&local_addr)?);
        }

        Ok(Self {
            listeners,
            payload,
            local_addr,
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of accept loops
    pub fn workers(&self) -> usize {
        self.listeners.len()
    }

    /// Serve forever
    ///
    /// Returns only if the runtime tears the accept loops down.
    pub async fn serve(self) -> Result<()> {
        let mut loops = Vec::with_capacity(self.listeners.len());
        for listener in self.listeners {
            let listener = tokio::net::TcpListener::from_std(listener)?;
            let payload = self.payload.clone();
            loops.push(tokio::spawn(accept_loop(listener, payload)));
        }

        for task in loops {
            task.await
                .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        }
        Ok(())
    }
}

/// Accept connections and serve each on its own task
async fn accept_loop(listener: tokio::net::TcpListener, payload: Arc<FixedPayload>) {
    loop {
        let (stream, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::debug!("accept error: {e}");
                continue;
            }
        };

        // Accepted sockets do not inherit TCP_NODELAY from the listener
        let _ = stream.set_nodelay(true);

        let payload = payload.clone();
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |_req: hyper::Request<Incoming>| {
                let payload = payload.clone();
                async move { Ok::<_, Infallible>(payload.to_response()) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                // Normal client disconnects land here too, keep it quiet
                tracing::debug!("connection error: {e}");
            }
        });
    }
}

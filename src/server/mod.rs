// Server module entry point
// Binds the listener, runs the accept loop, and stops it on request

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::AppState;
use crate::logger;

pub use listener::create_reusable_listener;
pub use signal::wait_for_shutdown;

/// A running server
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// The address actually bound, with any port 0 resolved
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and release the listener
    pub async fn kill_server(self) {
        self.shutdown.notify_one();
        if let Err(e) = self.task.await {
            logger::log_error(&format!("Server loop ended abnormally: {e}"));
        }
        logger::log_server_closed();
    }
}

/// Bind the configured address and start serving
///
/// Must be called from within a Tokio runtime.
pub fn init_app(state: Arc<AppState>) -> io::Result<ServerHandle> {
    let addr = state
        .config
        .get_socket_addr()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let listener = create_reusable_listener(addr)?;
    let local_addr = listener.local_addr()?;

    let shutdown = Arc::new(Notify::new());
    let task = tokio::spawn(server_loop::start_server_loop(
        listener,
        state,
        Arc::new(AtomicUsize::new(0)),
        Arc::clone(&shutdown),
    ));

    Ok(ServerHandle {
        local_addr,
        shutdown,
        task,
    })
}

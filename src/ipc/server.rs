//! IPC Server - Unix socket server for the store daemon
//!
//! Provides:
//! - Unix stream socket listener
//! - Client connection handling
//! - Request routing and response sending
//! - Event broadcasting to subscribers

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::OwnedWriteHalf;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{RwLock, broadcast, mpsc};

use crate::error::{Result, TaskshopError};
use crate::ipc::messages::{DaemonError, DaemonEvent, DaemonRequest, DaemonResponse, Methods};

/// Configuration for the IPC server
#[derive(Debug, Clone)]
pub struct IpcServerConfig {
    /// Path to the Unix socket
    pub socket_path: PathBuf,
    /// Maximum number of concurrent clients
    pub max_clients: usize,
    /// Channel capacity for events
    pub event_channel_capacity: usize,
}

impl Default for IpcServerConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            max_clients: 16,
            event_channel_capacity: 256,
        }
    }
}

impl IpcServerConfig {
    pub fn with_socket_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.socket_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_max_clients(mut self, max: usize) -> Self {
        self.max_clients = max;
        self
    }
}

/// Default socket location: `<runtime or temp dir>/taskshop.sock`
pub fn default_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("taskshop.sock")
}

/// Handler trait for processing requests
pub trait RequestHandler: Send + Sync {
    /// Handle a request and return a response
    fn handle(&self, request: DaemonRequest) -> impl std::future::Future<Output = DaemonResponse> + Send;
}

/// Connected client state
#[derive(Debug)]
struct ClientState {
    subscribed: bool,
}

/// Cloneable handle that stops a running server.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: mpsc::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to shutdown
    pub async fn shutdown(&self) {
        let _ = self.tx.send(()).await;
    }
}

/// IPC Server for daemon communication
pub struct IpcServer {
    config: IpcServerConfig,
    clients: Arc<RwLock<HashMap<u64, ClientState>>>,
    event_tx: broadcast::Sender<DaemonEvent>,
    next_client_id: u64,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl IpcServer {
    pub fn new() -> Self {
        Self::with_config(IpcServerConfig::default())
    }

    pub fn with_config(config: IpcServerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        Self {
            config,
            clients: Arc::new(RwLock::new(HashMap::new())),
            event_tx,
            next_client_id: 1,
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    /// Sender side of the event channel; handlers publish through a clone of it.
    pub fn event_sender(&self) -> broadcast::Sender<DaemonEvent> {
        self.event_tx.clone()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Get count of connected clients
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Bind the socket, replacing a stale socket file if one is present.
    pub fn bind(&self) -> Result<UnixListener> {
        if self.config.socket_path.exists() {
            std::fs::remove_file(&self.config.socket_path)?;
        }
        if let Some(parent) = self.config.socket_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let listener = UnixListener::bind(&self.config.socket_path)
            .map_err(|e| TaskshopError::Ipc(format!("Failed to bind socket: {}", e)))?;
        info!("Listening on {}", self.config.socket_path.display());
        Ok(listener)
    }

    /// Bind and serve until shutdown.
    pub async fn run<H: RequestHandler + 'static>(self, handler: Arc<H>) -> Result<()> {
        let listener = self.bind()?;
        self.serve(listener, handler).await
    }

    /// Accept clients on an already bound listener until shutdown.
    pub async fn serve<H: RequestHandler + 'static>(mut self, listener: UnixListener, handler: Arc<H>) -> Result<()> {
        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, _addr)) => {
                            let client_count = self.clients.read().await.len();
                            if client_count >= self.config.max_clients {
                                warn!("Rejecting client: {} clients connected", client_count);
                                continue;
                            }

                            let client_id = self.next_client_id;
                            self.next_client_id += 1;
                            self.clients.write().await.insert(client_id, ClientState { subscribed: false });
                            debug!("Client {} connected", client_id);

                            let handler = Arc::clone(&handler);
                            let clients = Arc::clone(&self.clients);
                            let event_rx = self.event_tx.subscribe();

                            tokio::spawn(async move {
                                if let Err(e) = handle_client(stream, client_id, handler, clients, event_rx).await {
                                    warn!("Client {} error: {}", client_id, e);
                                }
                            });
                        }
                        Err(e) => {
                            warn!("Accept error: {}", e);
                        }
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown requested");
                    break;
                }
            }
        }

        let _ = std::fs::remove_file(&self.config.socket_path);
        Ok(())
    }
}

impl Default for IpcServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn write_line<T: serde::Serialize>(writer: &mut OwnedWriteHalf, message: &T) -> Result<()> {
    let json = serde_json::to_string(message)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    Ok(())
}

/// Handle a single client connection
async fn handle_client<H: RequestHandler>(
    stream: UnixStream,
    client_id: u64,
    handler: Arc<H>,
    clients: Arc<RwLock<HashMap<u64, ClientState>>>,
    mut event_rx: broadcast::Receiver<DaemonEvent>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    // `next_line` keeps partial input buffered across select! cancellation
    let mut lines = BufReader::new(reader).lines();

    let result = loop {
        tokio::select! {
            read_result = lines.next_line() => {
                match read_result {
                    Ok(None) => break Ok(()),
                    Ok(Some(line)) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }

                        let response = match serde_json::from_str::<DaemonRequest>(trimmed) {
                            Ok(request) if request.method == Methods::SUBSCRIBE => {
                                if let Some(state) = clients.write().await.get_mut(&client_id) {
                                    state.subscribed = true;
                                }
                                DaemonResponse::success(request.id, serde_json::json!({"subscribed": true}))
                            }
                            Ok(request) => handler.handle(request).await,
                            Err(e) => DaemonResponse::error(0, DaemonError::parse_error(format!("Parse error: {}", e))),
                        };

                        if let Err(e) = write_line(&mut writer, &response).await {
                            break Err(e);
                        }
                    }
                    Err(e) => break Err(e.into()),
                }
            }
            event_result = event_rx.recv() => {
                match event_result {
                    Ok(event) => {
                        let is_subscribed = clients.read().await.get(&client_id).is_some_and(|s| s.subscribed);
                        if is_subscribed && let Err(e) = write_line(&mut writer, &event).await {
                            break Err(e);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Client {} lagged, skipped {} events", client_id, skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break Ok(()),
                }
            }
        }
    };

    clients.write().await.remove(&client_id);
    debug!("Client {} disconnected", client_id);
    result
}

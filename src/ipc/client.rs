//! IPC client for talking to the store daemon.
//!
//! Provides async connection to the daemon Unix socket with:
//! - Request/response correlation by request id
//! - Event subscription and streaming

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::{debug, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, WriteHalf};
use tokio::net::UnixStream;
use tokio::sync::{Mutex, mpsc, oneshot};

use crate::error::{Result, TaskshopError};
use crate::ipc::messages::{DaemonEvent, DaemonRequest, DaemonResponse, Methods};
use crate::ipc::server::default_socket_path;

/// Configuration for IPC client.
#[derive(Debug, Clone)]
pub struct IpcClientConfig {
    /// Path to daemon Unix socket.
    pub socket_path: PathBuf,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for IpcClientConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            request_timeout_ms: 30000,
        }
    }
}

impl IpcClientConfig {
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: path.into(),
            ..Default::default()
        }
    }
}

type PendingMap = HashMap<u64, oneshot::Sender<DaemonResponse>>;

/// Deliver one incoming line: responses to their waiting request, events to
/// the event queue. A full event queue drops the event so responses keep flowing.
async fn route_message(line: &str, pending: &Mutex<PendingMap>, event_sender: &mpsc::Sender<DaemonEvent>) {
    // Responses carry an "id"; events carry an "event"
    if let Ok(response) = serde_json::from_str::<DaemonResponse>(line) {
        if let Some(sender) = pending.lock().await.remove(&response.id) {
            let _ = sender.send(response);
        }
    } else if let Ok(event) = serde_json::from_str::<DaemonEvent>(line) {
        match event_sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!("Event queue full, dropping {}", event.event);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    } else {
        debug!("Ignoring unrecognised message: {}", line);
    }
}

/// IPC client for communicating with daemon.
pub struct IpcClient {
    config: IpcClientConfig,
    writer: Mutex<Option<WriteHalf<UnixStream>>>,
    pending: Arc<Mutex<PendingMap>>,
    next_id: AtomicU64,
    connected: Arc<AtomicBool>,
    event_sender: mpsc::Sender<DaemonEvent>,
    event_receiver: Mutex<mpsc::Receiver<DaemonEvent>>,
}

impl IpcClient {
    pub fn new(config: IpcClientConfig) -> Self {
        let (event_sender, event_receiver) = mpsc::channel(100);
        Self {
            config,
            writer: Mutex::new(None),
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            connected: Arc::new(AtomicBool::new(false)),
            event_sender,
            event_receiver: Mutex::new(event_receiver),
        }
    }

    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self::new(IpcClientConfig::with_socket(path))
    }

    /// Connect to daemon.
    pub async fn connect(&self) -> Result<()> {
        let stream = UnixStream::connect(&self.config.socket_path).await.map_err(|e| {
            TaskshopError::Ipc(format!(
                "Failed to connect to {}: {}",
                self.config.socket_path.display(),
                e
            ))
        })?;

        let (reader, writer) = tokio::io::split(stream);
        *self.writer.lock().await = Some(writer);
        self.connected.store(true, Ordering::SeqCst);

        let pending = Arc::clone(&self.pending);
        let event_sender = self.event_sender.clone();
        let connected = Arc::clone(&self.connected);

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }

                        route_message(line, &pending, &event_sender).await;
                    }
                }
            }
            connected.store(false, Ordering::SeqCst);
            // Dropping the senders wakes every waiter with a closed channel
            pending.lock().await.clear();
        });

        Ok(())
    }

    pub async fn disconnect(&self) -> Result<()> {
        if let Some(mut writer) = self.writer.lock().await.take() {
            let _ = writer.shutdown().await;
        }
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    /// Send a request and wait for response.
    pub async fn request(&self, method: &str, params: Value) -> Result<DaemonResponse> {
        if !self.is_connected() {
            return Err(TaskshopError::Ipc("Not connected".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = DaemonRequest::new(id, method, params);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        let sent = self.send_line(&request).await;
        if let Err(e) = sent {
            self.pending.lock().await.remove(&id);
            return Err(e);
        }

        let timeout = tokio::time::Duration::from_millis(self.config.request_timeout_ms);
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(TaskshopError::Ipc("Connection closed before response".into())),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                Err(TaskshopError::Ipc("Request timeout".into()))
            }
        }
    }

    async fn send_line(&self, request: &DaemonRequest) -> Result<()> {
        let mut writer = self.writer.lock().await;
        let w = writer
            .as_mut()
            .ok_or_else(|| TaskshopError::Ipc("Writer not available".into()))?;
        let json = serde_json::to_string(request)?;
        w.write_all(json.as_bytes())
            .await
            .map_err(|e| TaskshopError::Ipc(format!("Failed to write: {}", e)))?;
        w.write_all(b"\n")
            .await
            .map_err(|e| TaskshopError::Ipc(format!("Failed to write newline: {}", e)))?;
        w.flush()
            .await
            .map_err(|e| TaskshopError::Ipc(format!("Failed to flush: {}", e)))?;
        Ok(())
    }

    /// Receive next event (waits until one is available).
    pub async fn recv_event(&self) -> Option<DaemonEvent> {
        self.event_receiver.lock().await.recv().await
    }

    /// Try to receive event without blocking.
    pub async fn try_recv_event(&self) -> Option<DaemonEvent> {
        self.event_receiver.lock().await.try_recv().ok()
    }

    // Convenience methods for common operations

    pub async fn ping(&self) -> Result<bool> {
        let response = self.request(Methods::PING, json!({})).await?;
        Ok(response.is_success())
    }

    pub async fn subscribe(&self) -> Result<DaemonResponse> {
        self.request(Methods::SUBSCRIBE, json!({})).await
    }

    pub async fn index(&self) -> Result<DaemonResponse> {
        self.request(Methods::INDEX, json!({})).await
    }

    pub async fn create_task(&self, id: Value, title: &str, completed: bool) -> Result<DaemonResponse> {
        self.request(
            Methods::TASK_CREATE,
            json!({ "id": id, "title": title, "completed": completed }),
        )
        .await
    }

    pub async fn list_tasks(&self) -> Result<DaemonResponse> {
        self.request(Methods::TASK_LIST, json!({})).await
    }

    /// Update a task; `None` fields are left out of the request.
    pub async fn update_task(&self, id: &str, title: Option<&str>, completed: Option<bool>) -> Result<DaemonResponse> {
        let mut params = json!({ "id": id });
        if let Some(title) = title {
            params["title"] = json!(title);
        }
        if let Some(completed) = completed {
            params["completed"] = json!(completed);
        }
        self.request(Methods::TASK_UPDATE, params).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<DaemonResponse> {
        self.request(Methods::TASK_DELETE, json!({ "id": id })).await
    }

    pub async fn create_product(&self, name: &str, category: &str, price: f64) -> Result<DaemonResponse> {
        self.request(
            Methods::PRODUCT_CREATE,
            json!({ "name": name, "category": category, "price": price }),
        )
        .await
    }

    /// List products; query values are passed as text, like a query string.
    pub async fn list_products(
        &self,
        category: Option<&str>,
        price_min: Option<&str>,
        price_max: Option<&str>,
    ) -> Result<DaemonResponse> {
        let mut params = json!({});
        if let Some(category) = category {
            params["category"] = json!(category);
        }
        if let Some(min) = price_min {
            params["priceMin"] = json!(min);
        }
        if let Some(max) = price_max {
            params["priceMax"] = json!(max);
        }
        self.request(Methods::PRODUCT_LIST, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = IpcClientConfig::default();
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.socket_path, default_socket_path());
    }

    #[test]
    fn test_client_with_socket() {
        let client = IpcClient::with_socket("/tmp/custom.sock");
        assert_eq!(client.socket_path(), Path::new("/tmp/custom.sock"));
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_request_without_connection_fails() {
        let client = IpcClient::with_socket("/tmp/taskshop-missing.sock");
        let err = client.list_tasks().await.unwrap_err();
        assert!(err.to_string().contains("Not connected"));
    }

    #[tokio::test]
    async fn test_connect_to_missing_socket_fails() {
        let dir = tempfile::tempdir().unwrap();
        let client = IpcClient::with_socket(dir.path().join("nobody.sock"));
        assert!(client.connect().await.is_err());
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_full_event_queue_does_not_block_responses() {
        let pending = Mutex::new(PendingMap::new());
        let (event_sender, mut event_receiver) = mpsc::channel(2);
        let event_line = r#"{"event":"product.created","data":{"id":1}}"#;
        for _ in 0..5 {
            route_message(event_line, &pending, &event_sender).await;
        }

        let (tx, rx) = oneshot::channel();
        pending.lock().await.insert(9, tx);
        route_message(r#"{"id":9,"status":200,"result":[]}"#, &pending, &event_sender).await;

        let response = rx.await.unwrap();
        assert_eq!(response.id, 9);
        assert!(event_receiver.try_recv().is_ok());
        assert!(event_receiver.try_recv().is_ok());
        assert!(event_receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_try_recv_event_empty() {
        let client = IpcClient::with_socket("/tmp/taskshop-missing.sock");
        assert!(client.try_recv_event().await.is_none());
    }
}

//! IPC Layer - Unix socket transport between clients and the store daemon
//!
//! This module provides:
//! - Message types for requests, responses and events
//! - Unix socket server for the daemon
//! - Client for the command-line front end

pub mod client;
pub mod messages;
pub mod server;

pub use client::{IpcClient, IpcClientConfig};
pub use messages::{DaemonError, DaemonEvent, DaemonRequest, DaemonResponse, ErrorCode, Events, Methods, Status};
pub use server::{IpcServer, IpcServerConfig, RequestHandler, ShutdownHandle, default_socket_path};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hook service transport over a Unix domain socket.
//!
//! Inbound frames are forwarded as events; EOF or a read error on the socket
//! is the death notification. Service appearance is observed by watching the
//! socket's parent directory.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use oemtunnel_core::Event;
use oemtunnel_wire::{read_frame, write_frame, Endpoint};
use tokio::net::unix::OwnedWriteHalf;
use tokio::net::UnixStream;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::hook::{HookAdapter, HookError};

/// Socket-backed [`HookAdapter`].
pub struct SocketHookAdapter {
    path: PathBuf,
    events: mpsc::Sender<Event>,
    writer: Mutex<Option<OwnedWriteHalf>>,
    reader_task: Mutex<Option<JoinHandle<()>>>,
}

impl SocketHookAdapter {
    pub fn new(path: PathBuf, events: mpsc::Sender<Event>) -> Self {
        Self { path, events, writer: Mutex::new(None), reader_task: Mutex::new(None) }
    }
}

#[async_trait]
impl HookAdapter for SocketHookAdapter {
    async fn connect(&self) -> Result<(), HookError> {
        let stream = UnixStream::connect(&self.path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused => HookError::NotFound,
            _ => HookError::Io(e),
        })?;
        let (mut read_half, write_half) = stream.into_split();

        // A previous epoch's reader has either seen EOF already or must not
        // outlive its connection.
        if let Some(task) = self.reader_task.lock().await.take() {
            task.abort();
        }
        *self.writer.lock().await = Some(write_half);

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            loop {
                match read_frame(&mut read_half).await {
                    Ok(frame) => {
                        let event = match frame.endpoint {
                            Endpoint::Response => {
                                Event::HookResponse { code: frame.code, payload: frame.payload }
                            }
                            Endpoint::Indication => {
                                Event::HookIndication { code: frame.code, payload: frame.payload }
                            }
                            Endpoint::Request => {
                                warn!(code = frame.code, "request frame from service, ignoring");
                                continue;
                            }
                        };
                        if events.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "hook socket closed");
                        let _ = events.send(Event::ServiceDied).await;
                        break;
                    }
                }
            }
        });
        *self.reader_task.lock().await = Some(task);
        Ok(())
    }

    async fn disconnect(&self) {
        if let Some(task) = self.reader_task.lock().await.take() {
            task.abort();
        }
        *self.writer.lock().await = None;
    }

    async fn transact(&self, code: u32, payload: &[u8]) -> Result<(), HookError> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(HookError::NotConnected)?;
        write_frame(writer, Endpoint::Request, code, payload).await?;
        Ok(())
    }
}

/// Watch for the hook service socket appearing.
///
/// The watcher stays installed for the whole process lifetime so that a
/// service restart after a death event is picked up too; the connector
/// ignores appearance events while already connected.
pub fn spawn_appearance_watcher(
    socket_path: &Path,
    events: mpsc::Sender<Event>,
) -> Result<RecommendedWatcher, notify::Error> {
    let target = socket_path.to_path_buf();
    let watch_dir = match socket_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut watcher =
        notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) if event.kind.is_create() && event.paths.iter().any(|p| p == &target) => {
                let _ = events.blocking_send(Event::ServiceAppeared);
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "socket watcher error"),
        })?;
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

#[cfg(test)]
#[path = "socket_tests.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use super::PlayerStatus;

/// What the player process reports back, delivered on the app's event channel.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    Status(PlayerStatus),
    /// Current position in whole seconds, answer to `request_position`.
    Position(u32),
    Error(String),
}

/// The external thing that actually makes sound.
#[async_trait]
pub trait PlaybackBackend: Send + Sync {
    async fn load(&self, video_id: &str) -> Result<()>;
    /// Unloads the current stream, leaving the player idle.
    async fn stop(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn resume(&self) -> Result<()>;
    async fn seek(&self, secs: u32) -> Result<()>;
    async fn set_volume(&self, percent: u8) -> Result<()>;
    /// Asks for the position; the answer arrives later as `BackendEvent::Position`.
    async fn request_position(&self) -> Result<()>;
    async fn shutdown(&self);
}

/// Used when no player process is available. Accepts everything, plays nothing.
pub struct NullBackend;

#[async_trait]
impl PlaybackBackend for NullBackend {
    async fn load(&self, video_id: &str) -> Result<()> {
        debug!(video_id, "no playback backend, ignoring load");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        Ok(())
    }

    async fn resume(&self) -> Result<()> {
        Ok(())
    }

    async fn seek(&self, _secs: u32) -> Result<()> {
        Ok(())
    }

    async fn set_volume(&self, _percent: u8) -> Result<()> {
        Ok(())
    }

    async fn request_position(&self) -> Result<()> {
        Ok(())
    }

    async fn shutdown(&self) {}
}

/// Requests for the backend, executed one at a time in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Load(String),
    Stop,
    Pause,
    Resume,
    Seek(u32),
    Volume(u8),
    RequestPosition,
}

/// Runs backend commands off the UI loop. Failures are reported as
/// `BackendEvent::Error`; the worker stops when the command channel closes.
pub fn spawn_worker(
    backend: Arc<dyn PlaybackBackend>,
    mut commands: mpsc::UnboundedReceiver<BackendCommand>,
    events: mpsc::Sender<BackendEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            let result = match &command {
                BackendCommand::Load(video_id) => backend.load(video_id).await,
                BackendCommand::Stop => backend.stop().await,
                BackendCommand::Pause => backend.pause().await,
                BackendCommand::Resume => backend.resume().await,
                BackendCommand::Seek(secs) => backend.seek(*secs).await,
                BackendCommand::Volume(percent) => backend.set_volume(*percent).await,
                BackendCommand::RequestPosition => backend.request_position().await,
            };
            if let Err(e) = result {
                warn!(?command, "playback backend error: {e:#}");
                if events.send(BackendEvent::Error(format!("{e}"))).await.is_err() {
                    break;
                }
            }
        }
        backend.shutdown().await;
    })
}

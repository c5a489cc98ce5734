//! mpv as the audio backend, driven over its JSON IPC socket.
//!
//! The process is started lazily on the first `load` and kept idle between
//! tracks. A reader task turns IPC events into [`BackendEvent`]s.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::{
    path::PathBuf,
    process::Stdio,
    sync::atomic::{AtomicU8, Ordering},
    time::Duration,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{unix::OwnedWriteHalf, UnixStream},
    process::{Child, Command},
    sync::{mpsc, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::{
    backend::{BackendEvent, PlaybackBackend},
    PlayerStatus, DEFAULT_VOLUME,
};
use crate::api::youtube::watch_url;

const POSITION_REQUEST_ID: u64 = 7;
const PAUSE_OBSERVER_ID: u64 = 1;
const CONNECT_ATTEMPTS: u32 = 50;
const CONNECT_INTERVAL: Duration = Duration::from_millis(100);

struct MpvProcess {
    child: Child,
    writer: OwnedWriteHalf,
    reader: JoinHandle<()>,
}

pub struct MpvBackend {
    mpv_path: String,
    socket_path: PathBuf,
    events: mpsc::Sender<BackendEvent>,
    volume: AtomicU8,
    process: Mutex<Option<MpvProcess>>,
}

impl MpvBackend {
    pub fn new(mpv_path: impl Into<String>, events: mpsc::Sender<BackendEvent>) -> Self {
        let socket_path =
            std::env::temp_dir().join(format!("moodwave-mpv-{}.sock", std::process::id()));
        MpvBackend {
            mpv_path: mpv_path.into(),
            socket_path,
            events,
            volume: AtomicU8::new(DEFAULT_VOLUME),
            process: Mutex::new(None),
        }
    }

    async fn spawn(&self) -> Result<MpvProcess> {
        let _ = tokio::fs::remove_file(&self.socket_path).await;

        let child = Command::new(&self.mpv_path)
            .arg("--idle=yes")
            .arg("--no-video")
            .arg("--no-terminal")
            .arg(format!("--input-ipc-server={}", self.socket_path.display()))
            .arg(format!("--volume={}", self.volume.load(Ordering::Relaxed)))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", self.mpv_path))?;

        let stream = self.connect().await?;
        let (read_half, mut writer) = stream.into_split();

        let events = self.events.clone();
        let reader = tokio::spawn(async move {
            let mut lines = BufReader::new(read_half).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Ok(message) = serde_json::from_str::<Value>(&line) else {
                            continue;
                        };
                        if let Some(event) = translate_event(&message) {
                            if events.send(event).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("mpv IPC read error: {e}");
                        break;
                    }
                }
            }
            debug!("mpv IPC reader finished");
        });

        write_command(
            &mut writer,
            &json!({ "command": ["observe_property", PAUSE_OBSERVER_ID, "pause"] }),
        )
        .await?;

        info!(socket = %self.socket_path.display(), "mpv started");
        Ok(MpvProcess { child, writer, reader })
    }

    async fn connect(&self) -> Result<UnixStream> {
        for _ in 0..CONNECT_ATTEMPTS {
            if let Ok(stream) = UnixStream::connect(&self.socket_path).await {
                return Ok(stream);
            }
            tokio::time::sleep(CONNECT_INTERVAL).await;
        }
        Err(anyhow!(
            "mpv did not open its IPC socket at {}",
            self.socket_path.display()
        ))
    }

    /// Sends to a running player. Commands before the first `load` are dropped.
    async fn send(&self, command: Value) -> Result<()> {
        let mut guard = self.process.lock().await;
        let Some(process) = guard.as_mut() else {
            return Ok(());
        };
        let written = write_command(&mut process.writer, &command).await;
        if let Err(e) = written {
            // The process is gone; the next load starts a fresh one.
            if let Some(dead) = guard.take() {
                dead.reader.abort();
            }
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl PlaybackBackend for MpvBackend {
    async fn load(&self, video_id: &str) -> Result<()> {
        {
            let mut guard = self.process.lock().await;
            if guard.is_none() {
                *guard = Some(self.spawn().await?);
            }
        }
        let url = watch_url(video_id);
        debug!(url, "loading stream");
        self.send(json!({ "command": ["loadfile", url, "replace"] })).await?;
        self.send(json!({ "command": ["set_property", "pause", false] })).await
    }

    async fn stop(&self) -> Result<()> {
        self.send(json!({ "command": ["stop"] })).await
    }

    async fn pause(&self) -> Result<()> {
        self.send(json!({ "command": ["set_property", "pause", true] })).await
    }

    async fn resume(&self) -> Result<()> {
        self.send(json!({ "command": ["set_property", "pause", false] })).await
    }

    async fn seek(&self, secs: u32) -> Result<()> {
        self.send(json!({ "command": ["seek", secs, "absolute"] })).await
    }

    async fn set_volume(&self, percent: u8) -> Result<()> {
        self.volume.store(percent, Ordering::Relaxed);
        self.send(json!({ "command": ["set_property", "volume", percent] })).await
    }

    async fn request_position(&self) -> Result<()> {
        self.send(json!({
            "command": ["get_property", "time-pos"],
            "request_id": POSITION_REQUEST_ID,
        }))
        .await
    }

    async fn shutdown(&self) {
        let mut guard = self.process.lock().await;
        if let Some(mut process) = guard.take() {
            let _ = write_command(&mut process.writer, &json!({ "command": ["quit"] })).await;
            process.reader.abort();
            if let Err(e) = process.child.kill().await {
                debug!("mpv already exited: {e}");
            }
        }
        let _ = tokio::fs::remove_file(&self.socket_path).await;
    }
}

async fn write_command(writer: &mut OwnedWriteHalf, command: &Value) -> Result<()> {
    let mut line = serde_json::to_vec(command)?;
    line.push(b'\n');
    writer
        .write_all(&line)
        .await
        .context("Failed to write to mpv IPC socket")
}

/// Maps one IPC message onto a backend event, if it carries one we care about.
pub fn translate_event(message: &Value) -> Option<BackendEvent> {
    if message.get("request_id").and_then(Value::as_u64) == Some(POSITION_REQUEST_ID) {
        return message
            .get("data")
            .and_then(Value::as_f64)
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| BackendEvent::Position(secs as u32));
    }

    match message.get("event").and_then(Value::as_str)? {
        "start-file" => Some(BackendEvent::Status(PlayerStatus::Buffering)),
        // Also sent after a seek while paused, so it only means "ready here".
        // Play/pause comes from the pause observer.
        "playback-restart" => Some(BackendEvent::Status(PlayerStatus::Cued)),
        "end-file" => match message.get("reason").and_then(Value::as_str) {
            Some("eof") => Some(BackendEvent::Status(PlayerStatus::Ended)),
            Some("error") => Some(BackendEvent::Error(
                message
                    .get("file_error")
                    .and_then(Value::as_str)
                    .unwrap_or("playback failed")
                    .to_string(),
            )),
            _ => None,
        },
        "property-change" if message.get("name").and_then(Value::as_str) == Some("pause") => {
            match message.get("data").and_then(Value::as_bool)? {
                true => Some(BackendEvent::Status(PlayerStatus::Paused)),
                false => Some(BackendEvent::Status(PlayerStatus::Playing)),
            }
        }
        _ => None,
    }
}

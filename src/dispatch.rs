//! Event dispatcher: fans engine events out to sound cues and an optional
//! JSONL event log without ever blocking the game loop.
//!
//! The engine calls [`EventSink::notify`] synchronously; the dispatcher only
//! pushes onto an unbounded channel. A task on a private tokio runtime
//! consumes the channel, raises the bell flag for audible cues and appends
//! one JSON object per line to the log file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::audio::Cue;
use crate::core::EventSink;
use crate::types::GameEvent;

/// One line of the event log.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub seq: u64,
    pub at_ms: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    pub score: u32,
    pub level: u32,
}

#[derive(Debug)]
struct Dispatched {
    cue: Option<Cue>,
    record: EventRecord,
}

/// Settings for [`EventDispatcher::start`].
#[derive(Debug, Clone, Default)]
pub struct DispatchConfig {
    pub event_log: Option<PathBuf>,
    pub bell: bool,
}

pub struct EventDispatcher {
    rt: Runtime,
    tx: Option<mpsc::UnboundedSender<Dispatched>>,
    worker: Option<JoinHandle<()>>,
    bell: Arc<AtomicBool>,
    started: Instant,
    seq: u64,
    score: u32,
    level: u32,
}

impl EventDispatcher {
    pub fn start(config: DispatchConfig) -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("quadra-events")
            .enable_all()
            .build()
            .context("start event runtime")?;

        let (tx, rx) = mpsc::unbounded_channel::<Dispatched>();
        let bell = Arc::new(AtomicBool::new(false));
        let worker = rt.spawn(run_worker(config, rx, Arc::clone(&bell)));

        Ok(Self {
            rt,
            tx: Some(tx),
            worker: Some(worker),
            bell,
            started: Instant::now(),
            seq: 0,
            score: 0,
            level: 1,
        })
    }

    /// Score and level stamped on the records that follow.
    pub fn observe(&mut self, score: u32, level: u32) {
        self.score = score;
        self.level = level;
    }

    /// Clear and return the pending bell request.
    pub fn take_bell(&self) -> bool {
        self.bell.swap(false, Ordering::AcqRel)
    }

    /// Close the channel and wait (briefly) for the log to be flushed.
    pub fn shutdown(mut self) {
        self.tx = None;
        if let Some(worker) = self.worker.take() {
            let _ = self
                .rt
                .block_on(async move { tokio::time::timeout(Duration::from_secs(2), worker).await });
        }
    }
}

impl EventSink for EventDispatcher {
    fn notify(&mut self, event: GameEvent) {
        self.seq += 1;
        let lines = match event {
            GameEvent::LinesCleared(n) => Some(n),
            _ => None,
        };
        let record = EventRecord {
            seq: self.seq,
            at_ms: self.started.elapsed().as_millis() as u64,
            event: event.as_str(),
            lines,
            score: self.score,
            level: self.level,
        };
        if let Some(tx) = &self.tx {
            let _ = tx.send(Dispatched {
                cue: Cue::for_event(event),
                record,
            });
        }
    }
}

async fn run_worker(
    config: DispatchConfig,
    mut rx: mpsc::UnboundedReceiver<Dispatched>,
    bell: Arc<AtomicBool>,
) {
    use tokio::fs::OpenOptions;
    use tokio::io::AsyncWriteExt;

    // A log that cannot be opened is skipped; cues still work.
    let mut file = match &config.event_log {
        Some(path) => OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .ok(),
        None => None,
    };

    let mut buf: Vec<u8> = Vec::with_capacity(256);

    while let Some(msg) = rx.recv().await {
        if config.bell && msg.cue.is_some_and(Cue::rings_bell) {
            bell.store(true, Ordering::Release);
        }

        let Some(f) = file.as_mut() else {
            continue;
        };
        buf.clear();
        if serde_json::to_writer(&mut buf, &msg.record).is_err() {
            continue;
        }
        buf.push(b'\n');
        if f.write_all(&buf).await.is_err() {
            file = None;
        }
    }

    if let Some(mut f) = file {
        let _ = f.flush().await;
    }
}

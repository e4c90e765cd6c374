use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::{Instant, interval_at};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};

use crate::AuditLogEntry;

const CONNECTED_MESSAGE: &str = "Live logging connection established";

/// Severity of a live log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveLogLevel {
    /// Informational.
    Info,
    /// Degraded delivery.
    Warn,
}

impl LiveLogLevel {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

/// One line pushed to live tail clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveLogLine {
    /// Event time.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: LiveLogLevel,
    /// Human-readable text.
    pub message: String,
}

impl LiveLogLine {
    fn now(level: LiveLogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }

    fn from_audit_entry(entry: AuditLogEntry) -> Self {
        let actor = entry
            .actor_display_name
            .or_else(|| entry.actor_id.map(|actor_id| format!("admin #{actor_id}")))
            .unwrap_or_else(|| "system".to_owned());
        let message = if entry.details.is_empty() {
            format!("{actor}: {}", entry.action)
        } else {
            format!("{actor}: {} ({})", entry.action, entry.details)
        };

        Self {
            timestamp: entry.timestamp,
            level: LiveLogLevel::Info,
            message,
        }
    }
}

/// Frame emitted by a live tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveLogFrame {
    /// Data frame.
    Line(LiveLogLine),
    /// Liveness marker without payload.
    KeepAlive,
}

/// Counts open streams for as long as it is alive.
pub(crate) struct SubscriptionGuard(Arc<AtomicUsize>);

impl SubscriptionGuard {
    pub(crate) fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Live tail stream. Dropping it releases its timer and audit subscription.
pub struct LiveLogStream {
    frames: BoxStream<'static, LiveLogFrame>,
    _guard: SubscriptionGuard,
}

impl LiveLogStream {
    pub(crate) fn open(
        keepalive_interval: Duration,
        audit_entries: Option<broadcast::Receiver<AuditLogEntry>>,
        guard: SubscriptionGuard,
    ) -> Self {
        let connected = stream::iter([LiveLogFrame::Line(LiveLogLine::now(
            LiveLogLevel::Info,
            CONNECTED_MESSAGE,
        ))]);
        let heartbeat = IntervalStream::new(interval_at(
            Instant::now() + keepalive_interval,
            keepalive_interval,
        ))
        .map(|_| LiveLogFrame::KeepAlive);

        let tail = match audit_entries {
            Some(receiver) => stream::select(
                heartbeat,
                BroadcastStream::new(receiver).map(audit_frame),
            )
            .boxed(),
            None => heartbeat.boxed(),
        };

        Self {
            frames: connected.chain(tail).boxed(),
            _guard: guard,
        }
    }
}

fn audit_frame(item: Result<AuditLogEntry, BroadcastStreamRecvError>) -> LiveLogFrame {
    match item {
        Ok(entry) => LiveLogFrame::Line(LiveLogLine::from_audit_entry(entry)),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => LiveLogFrame::Line(LiveLogLine::now(
            LiveLogLevel::Warn,
            format!("Live log fell behind; {skipped} audit entries skipped"),
        )),
    }
}

impl Stream for LiveLogStream {
    type Item = LiveLogFrame;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.frames.poll_next_unpin(cx)
    }
}

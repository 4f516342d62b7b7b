//! Transient success/error notices shown after each admin action.

use std::time::{Duration, Instant};

/// How long a notice stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Queue of notices that expire after a fixed lifetime.
#[derive(Debug, Clone)]
pub struct Notifier {
    lifetime: Duration,
    notices: Vec<Notice>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_LIFETIME)
    }
}

impl Notifier {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            notices: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into(), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into(), Instant::now());
    }

    fn push(&mut self, kind: NoticeKind, message: String, created_at: Instant) {
        if message.is_empty() {
            return;
        }
        match kind {
            NoticeKind::Success => tracing::info!(%message, "Notice"),
            NoticeKind::Error => tracing::warn!(%message, "Notice"),
        }
        self.notices.push(Notice {
            kind,
            message,
            created_at,
        });
    }

    /// Notices still visible now, oldest first.
    pub fn active(&mut self) -> &[Notice] {
        self.active_at(Instant::now())
    }

    /// Notices still visible at `now`. Expired ones are dropped.
    pub fn active_at(&mut self, now: Instant) -> &[Notice] {
        let lifetime = self.lifetime;
        self.notices
            .retain(|n| now.saturating_duration_since(n.created_at) < lifetime);
        &self.notices
    }

    /// The most recent notice, expired or not.
    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn dismiss_all(&mut self) {
        self.notices.clear();
    }
}

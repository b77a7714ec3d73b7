//! Status messages for the page's toast component.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short, transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget receiver of notices.
pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// Buffers notices until the host drains them.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: Vec<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn last(&self) -> Option<&Notice> {
        self.pending.last()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl NotificationSink for NoticeQueue {
    fn notify(&mut self, notice: Notice) {
        log::debug!("notice [{:?}] {}", notice.level, notice.message);
        self.pending.push(notice);
    }
}

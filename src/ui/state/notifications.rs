use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn accent(self) -> &'static str {
        match self {
            Severity::Success => "#2e7d32",
            Severity::Info => "#1565c0",
            Severity::Warning => "#ef6c00",
            Severity::Error => "#c62828",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

/// Stack of transient messages; new ones are added below older ones.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.push_at(message, severity, Instant::now())
    }

    pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        self.next_id += 1;
        self.items.push(Notice {
            id: self.next_id,
            message: message.into(),
            severity,
            expires_at: now + NOTICE_TTL,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|notice| notice.id != id);
        self.items.len() != before
    }

    /// Drops every notice whose lifetime has run out. Returns how many went.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|notice| notice.expires_at > now);
        before - self.items.len()
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

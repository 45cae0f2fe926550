//! User-facing notices emitted by the response interceptor.
//!
//! The pipeline owns the one definition of each notice text so every call
//! site reports failures the same way. The sink is a trait so tests can
//! record notices instead of printing them.

use parking_lot::Mutex;

/// Cross-cutting notice produced by the response interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Credential was rejected and the session has been torn down.
    SessionExpired,
    /// 5xx-class fault.
    ServerError,
    /// Server-provided message, surfaced verbatim.
    Message(String),
    /// Client-side fault with no server message.
    GenericError,
    /// No response received at all.
    NetworkError,
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::SessionExpired => "Session expired. Please log in again.",
            Notice::ServerError => "Server error. Please try again later.",
            Notice::Message(msg) => msg,
            Notice::GenericError => "Something went wrong. Please try again.",
            Notice::NetworkError => "Cannot reach the server. Check your network connection.",
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Production sink: one line per notice on stderr, mirrored to the log.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!("{}", notice.text());
        eprintln!("[!!] {}", notice.text());
    }
}

/// Recording sink for tests.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

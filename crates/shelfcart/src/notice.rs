//! User-facing notices emitted by cart operations.
//!
//! The presentation layer decides how to render them (toast, status line,
//! stderr); the cart only says what happened and how serious it is.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::ids::BookId;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Human-readable message.
    pub message: String,
    /// Book the notice is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<BookId>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            book: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Attach the book this notice concerns.
    pub fn about(mut self, book: BookId) -> Self {
        self.book = Some(book);
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Receiver for notices.
pub trait NoticeSink {
    fn notify(&self, notice: Notice);
}

/// Discards every notice.
impl NoticeSink for () {
    fn notify(&self, _notice: Notice) {}
}

impl<N: NoticeSink + ?Sized> NoticeSink for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Records notices in order.
///
/// Clones share the same log, so a caller can keep a handle while the cart
/// manager owns another.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every notice recorded so far.
    pub fn snapshot(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Remove and return every recorded notice.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    /// The most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl NoticeSink for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// Emits each notice as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn notify(&self, notice: Notice) {
        let book = notice.book.as_ref().map(BookId::as_str).unwrap_or("");
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(book, "{}", notice.message)
            }
            NoticeLevel::Warning => tracing::warn!(book, "{}", notice.message),
            NoticeLevel::Error => tracing::error!(book, "{}", notice.message),
        }
    }
}

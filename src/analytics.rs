//! Analytics collaborator.
//!
//! The shell reports two things: a page view per navigation (tagged with the
//! page name *as requested*, so invalid routes show up) and every failure it
//! swallows. Reporting is fire-and-forget; an implementation must not panic
//! and the shell never inspects the outcome.

use crate::error::ShellError;
use crate::{error_log, info_log};

/// Receiver of page views and exception reports.
pub trait Analytics: Send + Sync + 'static {
    fn track_page_view(&self, name: &str);

    fn track_exception(&self, error: &ShellError);
}

/// Writes events to the log. The default collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn track_page_view(&self, name: &str) {
        info_log!("page view: {}", name);
    }

    fn track_exception(&self, error: &ShellError) {
        error_log!("exception [{}]: {}", error.kind(), error);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track_page_view(&self, _name: &str) {}

    fn track_exception(&self, _error: &ShellError) {}
}

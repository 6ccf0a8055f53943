//! Crash reporting
//!
//! Last-resort capture of uncaught errors: each report is logged and kept
//! in a bounded buffer for inspection. Nothing here attempts recovery.

use std::collections::VecDeque;
use std::time::SystemTime;
use tracing::error;

/// Reports retained before the oldest is dropped
pub const CRASH_LOG_CAPACITY: usize = 32;

/// One uncaught error
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub stack: Option<String>,
    /// Source location, e.g. "main.js:42"
    pub source: Option<String>,
    pub user_agent: String,
    pub timestamp: SystemTime,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
            source: None,
            user_agent: user_agent.into(),
            timestamp: SystemTime::now(),
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Bounded buffer of error reports
#[derive(Debug)]
pub struct CrashLog {
    capacity: usize,
    reports: VecDeque<ErrorReport>,
}

impl CrashLog {
    pub fn new() -> Self {
        Self::with_capacity(CRASH_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            reports: VecDeque::new(),
        }
    }

    /// Log and retain a report, evicting the oldest at capacity
    pub fn capture(&mut self, report: ErrorReport) {
        error!(
            message = %report.message,
            source = report.source.as_deref(),
            "uncaught error"
        );
        if self.reports.len() == self.capacity {
            self.reports.pop_front();
        }
        self.reports.push_back(report);
    }

    /// Retained reports, oldest first
    pub fn reports(&self) -> impl Iterator<Item = &ErrorReport> {
        self.reports.iter()
    }

    pub fn last(&self) -> Option<&ErrorReport> {
        self.reports.back()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Default for CrashLog {
    fn default() -> Self {
        Self::new()
    }
}

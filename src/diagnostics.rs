//! Advisory diagnostics for the assembly pipeline.
//!
//! The pipeline never fails on data-shape problems; it reports them here and
//! carries on. Messages are collected so callers can inspect or display them,
//! and mirrored to the [`log`] facade.

use log::{error, warn};

/// Collects the warning and error text emitted while assembling a control
/// network.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a non-fatal problem (an element was skipped, a reference could
    /// not be honored).
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.warnings.push(message);
    }

    /// Records a file-level problem. Assembly still returns a (possibly
    /// empty) result.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.errors.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

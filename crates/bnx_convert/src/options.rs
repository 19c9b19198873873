//! Conversion configuration and progress reporting.

use std::sync::mpsc::SyncSender;

use bnx_havok::Platform;
use bon::Builder;
use tracing::info;

/// A progress event emitted for each entry the converter rewrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Entry name inside its container, or the file name for loose files
    pub name: Box<str>,
}

/// Settings for one conversion run
///
/// Built once at startup and passed by reference through the pipeline; nothing in
/// the converter reads configuration from the environment.
#[derive(Debug, Clone, Builder)]
pub struct ConvertOptions {
    /// Platform whose layout converted assets should use
    #[builder(default)]
    pub platform: Platform,

    /// Progress event sink.
    ///
    /// Delivery is best effort: events are pushed with a non-blocking send and
    /// dropped when the receiver falls behind. No conversion output depends on an
    /// event arriving, so a slow consumer costs reporting fidelity, never
    /// correctness.
    pub progress: Option<SyncSender<Progress>>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            progress: None,
        }
    }
}

impl ConvertOptions {
    /// Report an entry as rewritten.
    pub(crate) fn touched(&self, name: &str) {
        info!("fixed '{name}'");
        if let Some(sink) = &self.progress {
            let _ = sink.try_send(Progress { name: name.into() });
        }
    }
}

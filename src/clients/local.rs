use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::clients::{CaptureDevice, Navigator, Notifier};
use crate::domain::{CaptureResult, CaptureSource};

/// Writes notifications to the log instead of showing a banner.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: Option<&str>) {
        info!(title, detail = message.unwrap_or_default(), "Notification");
    }
}

#[derive(Debug, Default, Clone)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn go_back(&self) {
        info!("Navigating back");
    }
}

/// Capture device that replays prepared results, then reports cancellation.
#[derive(Debug)]
pub struct ScriptedCapture {
    source: CaptureSource,
    results: Mutex<VecDeque<CaptureResult>>,
}

impl ScriptedCapture {
    pub fn new(source: CaptureSource, results: impl IntoIterator<Item = CaptureResult>) -> Self {
        Self {
            source,
            results: Mutex::new(results.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CaptureDevice for ScriptedCapture {
    async fn capture(&self) -> CaptureResult {
        let next = match self.results.lock() {
            Ok(mut results) => results.pop_front(),
            Err(_) => {
                warn!(source = %self.source, "Capture script lock poisoned");
                return CaptureResult::Errored("capture script unavailable".to_string());
            }
        };
        next.unwrap_or(CaptureResult::Cancelled)
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::DeliveryError;
use crate::workflows::report::SupplementaryScores;

/// Deferred one-shot report action, armed once all supplementary readings are entered.
///
/// Every input change cancels the pending action. After firing, the trigger stays
/// quiet until [`AutoReportTrigger::rearm`] is called.
#[derive(Debug)]
pub struct AutoReportTrigger {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    fired: Arc<AtomicBool>,
}

impl AutoReportTrigger {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Call on every input change. Returns `Ok(true)` when `action` was scheduled.
    pub fn update<F>(
        &mut self,
        readings: &SupplementaryScores,
        action: F,
    ) -> Result<bool, DeliveryError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        if !readings.is_complete() || self.has_fired() {
            return Ok(false);
        }
        let runtime = tokio::runtime::Handle::try_current()?;

        let fired = Arc::clone(&self.fired);
        let delay = self.delay;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !fired.swap(true, Ordering::SeqCst) {
                debug!(delay_ms = delay.as_millis() as u64, "auto report firing");
                action();
            }
        }));
        Ok(true)
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn rearm(&mut self) {
        self.cancel();
        self.fired.store(false, Ordering::SeqCst);
    }
}

impl Drop for AutoReportTrigger {
    fn drop(&mut self) {
        self.cancel();
    }
}

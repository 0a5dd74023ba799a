use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::debug;

use crate::ports::{IndicatorTimer, TimerTask};

/// Schedules tasks as sleeping tokio tasks on a runtime handle.
pub struct TokioIndicatorTimer {
    handle: Handle,
}

impl TokioIndicatorTimer {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime of the calling context, if there is one.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl IndicatorTimer for TokioIndicatorTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

/// Queues tasks until the host fires them. Used without a runtime and in
/// tests.
#[derive(Default)]
pub struct ManualTimer {
    queue: Mutex<Vec<(Duration, TimerTask)>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run every queued task in scheduling order; returns how many ran.
    pub fn fire_all(&self) -> usize {
        let tasks = std::mem::take(&mut *self.queue.lock());
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        debug!(count, "fired queued timer tasks");
        count
    }

    /// Drop queued tasks without running them.
    pub fn discard(&self) -> usize {
        std::mem::take(&mut *self.queue.lock()).len()
    }
}

impl IndicatorTimer for ManualTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) {
        self.queue.lock().push((delay, task));
    }
}

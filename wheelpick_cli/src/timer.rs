use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use wheelpick_core::{Scheduler, TimerHandle};

/// Wall-clock scheduler: each timer is a sleeping task that posts its handle
/// to a channel the event loop selects on. Cancelling aborts the task.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    tx: UnboundedSender<TimerHandle>,
}

impl TokioScheduler {
    pub fn new() -> (Self, UnboundedReceiver<TimerHandle>) {
        let (tx, rx) = unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tasks: HashMap::new(),
            tx,
        };
        (scheduler, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the host is shutting down
            let _ = tx.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.tasks.remove(&handle) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    fn fired(&mut self, handle: TimerHandle) -> bool {
        self.tasks.remove(&handle).is_some()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

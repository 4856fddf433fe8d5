//! In-process local notification scheduler.
//!
//! Each scheduled notification is a sleeping tokio task. When it fires, the
//! notification is handed to the host through an mpsc receiver. Scheduling an
//! id that is still pending aborts the old task and replaces it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info};
use vv_core::ports::{ClockPort, LocalNotification, LocalNotificationPort};

struct PendingEntry {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Default)]
struct PendingTable {
    next_generation: u64,
    entries: HashMap<String, PendingEntry>,
}

pub struct TokioNotificationScheduler {
    clock: Arc<dyn ClockPort>,
    pending: Arc<Mutex<PendingTable>>,
    delivered: mpsc::UnboundedSender<LocalNotification>,
}

impl TokioNotificationScheduler {
    /// Returns the scheduler and the receiver fired notifications arrive on.
    pub fn new(clock: Arc<dyn ClockPort>) -> (Self, mpsc::UnboundedReceiver<LocalNotification>) {
        let (delivered, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            clock,
            pending: Arc::new(Mutex::new(PendingTable::default())),
            delivered,
        };
        (scheduler, rx)
    }

    pub fn pending_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = lock(&self.pending).entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}

fn lock(table: &Mutex<PendingTable>) -> MutexGuard<'_, PendingTable> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl LocalNotificationPort for TokioNotificationScheduler {
    async fn schedule(&self, notification: LocalNotification) -> anyhow::Result<()> {
        let delay = (notification.fire_at - self.clock.now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        let id = notification.id.clone();

        let mut table = lock(&self.pending);
        table.next_generation += 1;
        let generation = table.next_generation;

        let pending = self.pending.clone();
        let delivered = self.delivered.clone();
        let task_id = id.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut table = lock(&pending);
                if table
                    .entries
                    .get(&task_id)
                    .is_some_and(|entry| entry.generation == generation)
                {
                    table.entries.remove(&task_id);
                }
            }
            info!(id = %task_id, "delivering local notification");
            if delivered.send(notification).is_err() {
                debug!(id = %task_id, "notification receiver dropped");
            }
        });

        let entry = PendingEntry {
            generation,
            handle: task.abort_handle(),
        };
        if let Some(previous) = table.entries.insert(id.clone(), entry) {
            previous.handle.abort();
            debug!(%id, "replaced pending notification");
        }
        debug!(%id, delay_secs = delay.as_secs(), "scheduled local notification");
        Ok(())
    }

    async fn cancel(&self, id: &str) -> anyhow::Result<()> {
        if let Some(entry) = lock(&self.pending).entries.remove(id) {
            entry.handle.abort();
            debug!(%id, "cancelled pending notification");
        }
        Ok(())
    }
}

impl Drop for TokioNotificationScheduler {
    fn drop(&mut self) {
        for (_, entry) in lock(&self.pending).entries.drain() {
            entry.handle.abort();
        }
    }
}

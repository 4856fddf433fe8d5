//! Calendar free-time notification polling.
//!
//! Polls `/api/calendar/notifications/check` and turns each new
//! free-time/event match into a local notification shortly before the slot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use vv_core::api::ApiError;
use vv_core::config::CalendarConfig;
use vv_core::ports::{CalendarPort, ClockPort, LocalNotification, LocalNotificationPort};

use crate::error::AppError;
use crate::session::SessionStore;

pub const NOTIFICATION_TITLE: &str = "You have free time!";

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct CalendarNotificationMonitor {
    inner: Arc<MonitorInner>,
    task: Mutex<Option<JoinHandle<()>>>,
}

struct MonitorInner {
    calendar: Arc<dyn CalendarPort>,
    notifications: Arc<dyn LocalNotificationPort>,
    session: Arc<SessionStore>,
    clock: Arc<dyn ClockPort>,
    config: CalendarConfig,
    active_loops: AtomicUsize,
}

/// Counts a polling loop as active for as long as its future exists.
struct ActiveLoop(Arc<MonitorInner>);

impl ActiveLoop {
    fn enter(inner: Arc<MonitorInner>) -> Self {
        inner.active_loops.fetch_add(1, Ordering::SeqCst);
        Self(inner)
    }
}

impl Drop for ActiveLoop {
    fn drop(&mut self) {
        self.0.active_loops.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CalendarNotificationMonitor {
    pub fn new(
        calendar: Arc<dyn CalendarPort>,
        notifications: Arc<dyn LocalNotificationPort>,
        session: Arc<SessionStore>,
        clock: Arc<dyn ClockPort>,
        config: CalendarConfig,
    ) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                calendar,
                notifications,
                session,
                clock,
                config,
                active_loops: AtomicUsize::new(0),
            }),
            task: Mutex::new(None),
        }
    }

    /// Start polling. A loop that is already running is cancelled and awaited
    /// first, so at most one loop exists at any time.
    pub async fn start(&self) -> Result<(), AppError> {
        self.inner.session.require_token()?;

        let mut task = self.task.lock().await;
        if let Some(previous) = task.take() {
            previous.abort();
            let _ = previous.await;
            debug!("previous calendar polling loop cancelled");
        }

        let guard = ActiveLoop::enter(self.inner.clone());
        *task = Some(tokio::spawn(async move {
            let inner = guard.0.clone();
            let _guard = guard;
            inner.run().await;
        }));
        info!(
            interval_secs = self.inner.config.poll_interval_secs,
            "calendar notification polling started"
        );
        Ok(())
    }

    pub async fn stop(&self) {
        if let Some(task) = self.task.lock().await.take() {
            task.abort();
            let _ = task.await;
            info!("calendar notification polling stopped");
        }
    }

    /// One check outside the schedule. Returns how many notifications were
    /// scheduled.
    pub async fn check_now(&self) -> Result<usize, AppError> {
        self.inner.check().await
    }

    pub fn active_loops(&self) -> usize {
        self.inner.active_loops.load(Ordering::SeqCst)
    }

    pub async fn is_running(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl MonitorInner {
    async fn run(&self) {
        tokio::time::sleep(self.config.initial_delay()).await;

        let period = self.config.poll_interval().max(MIN_POLL_INTERVAL);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.check().await {
                Ok(scheduled) => debug!(scheduled, "calendar notification check done"),
                Err(err) => warn!(error = %err, "calendar notification check failed"),
            }
        }
    }

    async fn check(&self) -> Result<usize, AppError> {
        let token = self.session.require_token()?;
        let response = self.calendar.check_notifications(&token).await?;
        if let Some(error) = response.error {
            return Err(ApiError::Server(error).into());
        }

        let now = self.clock.now();
        let Some(lead) = self.config.notify_lead() else {
            warn!(
                minutes = self.config.notify_lead_minutes,
                "notification lead time out of range, nothing scheduled"
            );
            return Ok(0);
        };
        let mut scheduled = 0;

        for candidate in response.notifications {
            let id = candidate.dedup_id();
            if self.session.is_notification_processed(&id) {
                continue;
            }
            let Some(body) = candidate.notification_body() else {
                continue;
            };
            let Some(start) = candidate.free_time.start_time() else {
                debug!(start = %candidate.free_time.start, "unparseable free time start");
                continue;
            };
            let Some(fire_at) = start.checked_sub_signed(lead) else {
                warn!(%id, "notification time out of range");
                continue;
            };
            if fire_at <= now {
                continue;
            }

            let notification = LocalNotification {
                id: id.clone(),
                title: NOTIFICATION_TITLE.to_string(),
                body,
                fire_at,
            };
            if let Err(err) = self.notifications.schedule(notification).await {
                warn!(%id, error = %err, "failed to schedule calendar notification");
                continue;
            }
            if let Err(err) = self.session.record_processed_notification(&id) {
                warn!(%id, error = %err, "failed to record processed notification");
            }
            info!(%id, %fire_at, "calendar notification scheduled");
            scheduled += 1;
        }

        Ok(scheduled)
    }
}

//! Watch-channel backed location source.
//!
//! The host pushes fixes and authorization changes; subscribers observe the
//! latest fix, and a one-shot request waits for the next one.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::trace;
use vv_core::location::Coordinate;
use vv_core::permission::PermissionError;
use vv_core::ports::LocationSourcePort;

pub struct ChannelLocationSource {
    fixes: watch::Sender<Option<Coordinate>>,
    authorized: watch::Sender<bool>,
}

impl Default for ChannelLocationSource {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ChannelLocationSource {
    pub fn new(authorized: bool) -> Self {
        let (fixes, _) = watch::channel(None);
        let (authorized, _) = watch::channel(authorized);
        Self { fixes, authorized }
    }

    /// Publish a new fix to every subscriber and pending request.
    pub fn push_fix(&self, fix: Coordinate) {
        trace!(lat = fix.latitude, lon = fix.longitude, "location fix");
        self.fixes.send_replace(Some(fix));
    }

    /// Revoking authorization fails pending one-shot requests.
    pub fn set_authorized(&self, authorized: bool) {
        self.authorized.send_if_modified(|current| {
            let changed = *current != authorized;
            *current = authorized;
            changed
        });
    }

    pub fn last_fix(&self) -> Option<Coordinate> {
        *self.fixes.borrow()
    }
}

#[async_trait]
impl LocationSourcePort for ChannelLocationSource {
    fn is_authorized(&self) -> bool {
        *self.authorized.borrow()
    }

    async fn request_fix(&self) -> Result<Coordinate, PermissionError> {
        let mut authorized = self.authorized.subscribe();
        if !*authorized.borrow_and_update() {
            return Err(PermissionError::NotAuthorized);
        }

        let mut fixes = self.fixes.subscribe();
        fixes.borrow_and_update();

        loop {
            tokio::select! {
                changed = fixes.changed() => {
                    if changed.is_err() {
                        return Err(PermissionError::NotAuthorized);
                    }
                    if let Some(fix) = *fixes.borrow_and_update() {
                        return Ok(fix);
                    }
                }
                changed = authorized.changed() => {
                    if changed.is_err() || !*authorized.borrow_and_update() {
                        return Err(PermissionError::NotAuthorized);
                    }
                }
            }
        }
    }

    fn subscribe(&self) -> watch::Receiver<Option<Coordinate>> {
        self.fixes.subscribe()
    }
}

use async_trait::async_trait;
use tokio::sync::watch;

use crate::location::Coordinate;
use crate::permission::PermissionError;

/// Source of device location fixes.
#[async_trait]
pub trait LocationSourcePort: Send + Sync {
    /// Whether location access is currently granted. Never prompts.
    fn is_authorized(&self) -> bool;

    /// Ask the platform for a single fix and wait for it. Implementations do
    /// not apply their own timeout; callers race this against one.
    async fn request_fix(&self) -> Result<Coordinate, PermissionError>;

    /// Continuous updates. `None` until the first fix arrives.
    fn subscribe(&self) -> watch::Receiver<Option<Coordinate>>;
}

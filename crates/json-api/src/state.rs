//! State

use std::sync::Arc;

use jiff::Timestamp;
use storefront_app::context::AppContext;

/// Shared per-process state injected into every request.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) started_at: Timestamp,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            app,
            started_at: Timestamp::now(),
        })
    }

    /// Whole seconds since the process started serving.
    #[must_use]
    pub(crate) fn uptime_seconds(&self, now: Timestamp) -> i64 {
        now.duration_since(self.started_at).as_secs()
    }
}

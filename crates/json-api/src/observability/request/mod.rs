//! Request-level logging and request IDs.

mod request_ids;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Logs each request inside an `http.request` span and flags slow ones.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogging {
    slow_request_threshold: Duration,
}

impl RequestLogging {
    #[must_use]
    pub(crate) fn new(slow_request_threshold_ms: u64) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(slow_request_threshold_ms),
        }
    }

    fn is_slow(&self, elapsed: Duration) -> bool {
        elapsed > self.slow_request_threshold
    }
}

#[handler]
impl RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let started = Instant::now();

        let request_id =
            request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

        request_ids::set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            request_id = %request_id,
            method = %method,
            path = %path,
            remote_addr = %req.remote_addr(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let status = request_ids::response_status_or_ok(res.status_code);
        let code = status.as_u16();
        let elapsed = started.elapsed();
        let duration_ms = elapsed.as_millis();

        span.record("status", code);
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            if status.is_server_error() {
                error!(status = code, duration_ms, "request.failed");
            } else if status.is_client_error() {
                warn!(status = code, duration_ms, "request.rejected");
            } else {
                info!(status = code, duration_ms, "request.completed");
            }

            if self.is_slow(elapsed) {
                warn!(
                    duration_ms,
                    threshold_ms = self.slow_request_threshold.as_millis(),
                    "request.slow"
                );
            }
        });
    }
}

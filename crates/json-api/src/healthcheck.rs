//! Healthcheck Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a dependency is down
    pub status: String,

    /// Database reachability, `ok` or `unavailable`
    pub database: String,

    /// Seconds since the server started
    pub uptime_seconds: i64,
}

/// Healthcheck handler
///
/// Reports whether the server can reach its database. Answers 503 when it cannot.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Healthy"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let database_ok = match state.app.health.ping_database().await {
        Ok(()) => true,
        Err(error) => {
            warn!("database ping failed: {error}");

            false
        }
    };

    if !database_ok {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        status: if database_ok { "ok" } else { "degraded" }.to_string(),
        database: if database_ok { "ok" } else { "unavailable" }.to_string(),
        uptime_seconds: state.uptime_seconds(Timestamp::now()),
    }))
}

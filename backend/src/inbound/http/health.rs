//! Readiness and liveness endpoints for orchestrators and load balancers.
//!
//! The service moves one way through [`ServiceStatus`]: `starting` until the
//! listener is bound, `serving` while it accepts traffic, and `draining` once
//! shutdown begins. Readiness passes only while serving; liveness fails only
//! while draining. Both answer with `{"status": ...}` and `Cache-Control:
//! no-store`.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Lifecycle stage reported by the health endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Storage and listener are still being prepared.
    Starting,
    /// Accepting requests.
    Serving,
    /// Shutting down; in-flight requests are finishing.
    Draining,
}

impl ServiceStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Body of both health responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    /// Current lifecycle stage.
    pub status: ServiceStatus,
}

#[derive(Debug, Clone, Copy)]
enum Check {
    Readiness,
    Liveness,
}

impl Check {
    fn passes(self, status: ServiceStatus) -> bool {
        match self {
            Self::Readiness => status == ServiceStatus::Serving,
            Self::Liveness => status != ServiceStatus::Draining,
        }
    }
}

/// Shared lifecycle state behind the health endpoints.
#[derive(Debug, Default)]
pub struct HealthState {
    status: AtomicU8,
}

impl HealthState {
    /// A fresh state in [`ServiceStatus::Starting`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `serving`. Has no effect once draining.
    pub fn mark_serving(&self) {
        let _ = self.status.compare_exchange(
            ServiceStatus::Starting as u8,
            ServiceStatus::Serving as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Enter `draining`; readiness and liveness both fail from here on.
    pub fn mark_draining(&self) {
        self.status
            .store(ServiceStatus::Draining as u8, Ordering::Release);
    }

    /// Current lifecycle stage.
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    fn respond(&self, check: Check) -> HttpResponse {
        let status = self.status();
        let mut builder = if check.passes(status) {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(HealthReport { status })
    }
}

/// Readiness: 200 while serving, 503 while starting or draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting traffic", body = HealthReport),
        (status = 503, description = "Starting or draining", body = HealthReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Check::Readiness)
}

/// Liveness: 200 until draining begins, 503 after.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is alive", body = HealthReport),
        (status = 503, description = "Draining for shutdown", body = HealthReport)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Check::Liveness)
}

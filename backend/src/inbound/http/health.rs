//! Readiness and liveness probes.
//!
//! The server moves through three phases: it starts unready, serves once the
//! listener is bound, and drains after the server future resolves. Draining is
//! terminal. Probe bodies also name the post storage in use, so an operator
//! can spot a deployment that fell back to in-memory posts.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Backing store for posts and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Phase {
    Starting = 0,
    Serving = 1,
    Draining = 2,
}

impl Phase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Serving => "serving",
            Self::Draining => "draining",
        }
    }
}

/// Server lifecycle shared between `main`, the server builder and the probes.
pub struct HealthState {
    phase: AtomicU8,
    storage: StorageKind,
}

impl HealthState {
    pub fn new(storage: StorageKind) -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting as u8),
            storage,
        }
    }

    /// Start serving. Has no effect once draining.
    pub fn mark_ready(&self) {
        // A failed exchange means the server is already serving or draining.
        self.phase
            .compare_exchange(
                Phase::Starting as u8,
                Phase::Serving as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok();
    }

    /// Enter the terminal draining phase; both probes fail from here on.
    pub fn mark_unhealthy(&self) {
        self.phase.store(Phase::Draining as u8, Ordering::Release);
    }

    fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::Acquire))
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Serving
    }

    pub fn is_alive(&self) -> bool {
        self.phase() != Phase::Draining
    }

    pub fn storage(&self) -> StorageKind {
        self.storage
    }
}

/// Body returned by both probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    /// Lifecycle phase: `starting`, `serving` or `draining`.
    #[schema(example = "serving")]
    status: &'static str,
    storage: StorageKind,
}

fn probe(state: &HealthState, healthy: bool) -> HttpResponse {
    let body = ProbeBody {
        status: state.phase().label(),
        storage: state.storage(),
    };
    let mut response = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// Readiness probe: 200 only while serving.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Accepting traffic", body = ProbeBody),
        (status = 503, description = "Starting or draining", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(&state, state.is_ready())
}

/// Liveness probe: 200 until the server starts draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive", body = ProbeBody),
        (status = 503, description = "Draining", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(&state, state.is_alive())
}

use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use sysinfo::System;

use crate::{constants::START_TIME, repositories::project::ProjectRepository, AppState};

/// Seconds a health snapshot stays fresh. The sysinfo refresh and the
/// DB ping are too heavy to run on every probe.
const SNAPSHOT_TTL_SECS: i64 = 5;

static LAST_SNAPSHOT_AT: AtomicI64 = AtomicI64::new(0);
static SNAPSHOT: Lazy<RwLock<HealthSnapshot>> = Lazy::new(|| RwLock::new(HealthSnapshot::default()));

#[derive(Serialize, Clone, Default)]
struct HostInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
}

#[derive(Serialize, Clone, Default)]
struct HealthSnapshot {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    database: String,
    version: String,
    memory_usage: String,
    system: HostInfo,
}

fn megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

async fn take_snapshot(state: &web::Data<AppState>) -> HealthSnapshot {
    let now = Utc::now();
    let uptime_secs = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let mut sys = System::new_all();
    sys.refresh_all();

    let database = match state.project_handler.project_repo.check_connection().await {
        Ok(()) => "OK",
        Err(_) => "Unavailable",
    };

    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or_else(|| "Unknown".to_string(), |p| megabytes(p.memory()));

    HealthSnapshot {
        status: "healthy".to_string(),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        timestamp: now.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        memory_usage,
        system: HostInfo {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
            cpu_count: sys.cpus().len(),
            memory_total: format!("{:.2} GB", sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0),
        },
    }
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();
    let last = LAST_SNAPSHOT_AT.load(Ordering::Relaxed);

    if now - last > SNAPSHOT_TTL_SECS {
        let snapshot = take_snapshot(&state).await;
        *SNAPSHOT.write() = snapshot.clone();
        LAST_SNAPSHOT_AT.store(now, Ordering::Relaxed);
        return HttpResponse::Ok().json(snapshot);
    }

    HttpResponse::Ok().json(SNAPSHOT.read().clone())
}

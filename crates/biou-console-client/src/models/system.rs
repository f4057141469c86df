// crates/biou-console-client/src/models/system.rs
// ============================================================================
// Module: System Models
// Description: Server info, health, and resource monitor payloads.
// Purpose: Type the `/system` endpoints.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

/// Build and runtime information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemInfo {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Description.
    pub description: String,
    /// Author.
    pub author: String,
    /// Build timestamp.
    pub build_time: String,
    /// Runtime version.
    pub java_version: String,
    /// Host OS name.
    pub os_name: String,
    /// Host OS version.
    pub os_version: String,
    /// Available processors.
    pub cpu_count: u32,
    /// Total memory, human readable.
    pub total_memory: String,
    /// Free memory, human readable.
    pub free_memory: String,
    /// Used memory, human readable.
    pub used_memory: String,
}

/// Dependency health.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthStatus {
    /// Overall status, for example `UP`.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Cache status.
    pub redis: String,
    /// Disk status.
    pub disk_space: String,
    /// Uptime in milliseconds.
    pub uptime: u64,
}

/// CPU usage sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuUsage {
    /// Usage percent.
    pub usage: f64,
    /// Load averages.
    pub load: Vec<f64>,
}

/// Capacity usage sample for memory or disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityUsage {
    /// Total bytes.
    pub total: f64,
    /// Used bytes.
    pub used: f64,
    /// Free bytes.
    pub free: f64,
    /// Usage percent.
    pub usage: f64,
}

/// Network counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkUsage {
    /// Bytes received.
    pub received: f64,
    /// Bytes sent.
    pub sent: f64,
}

/// Resource monitor snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorData {
    /// CPU sample.
    pub cpu: CpuUsage,
    /// Memory sample.
    pub memory: CapacityUsage,
    /// Disk sample.
    pub disk: CapacityUsage,
    /// Network counters.
    pub network: NetworkUsage,
}

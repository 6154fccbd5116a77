// Compute usage percentages from a raw Docker stats snapshot.

use crate::models::ContainerUsage;
use bollard::models::ContainerStatsResponse;

const BYTES_PER_MIB: f64 = 1_048_576.0;

/// One usage reading from a single stats response. The response carries the
/// current and immediately-prior CPU accounting windows; both must be
/// present. Returns None when either window is missing.
pub(crate) fn usage_from_stats(s: &ContainerStatsResponse, name: &str) -> Option<ContainerUsage> {
    let cpu_stats = s.cpu_stats.as_ref()?;
    let precpu_stats = s.precpu_stats.as_ref()?;

    let cpu_usage = cpu_stats.cpu_usage.as_ref()?;
    let precpu_usage = precpu_stats.cpu_usage.as_ref()?;

    let cpu_delta =
        cpu_usage.total_usage.unwrap_or(0) as i64 - precpu_usage.total_usage.unwrap_or(0) as i64;
    let system_delta = cpu_stats.system_cpu_usage.unwrap_or(0) as i64
        - precpu_stats.system_cpu_usage.unwrap_or(0) as i64;
    let online = cpu_stats.online_cpus.unwrap_or(1) as f64;
    let cpu_percent = if system_delta > 0 {
        (cpu_delta as f64 / system_delta as f64) * online * 100.0
    } else {
        0.0
    };

    let mem_usage = s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0);
    let mem_limit = s.memory_stats.as_ref().and_then(|m| m.limit).unwrap_or(0);
    let memory_percent = if mem_limit > 0 {
        (mem_usage as f64 / mem_limit as f64) * 100.0
    } else {
        0.0
    };

    Some(ContainerUsage {
        name: name.to_string(),
        cpu_percent,
        memory_usage_mib: mem_usage as f64 / BYTES_PER_MIB,
        memory_percent,
    })
}

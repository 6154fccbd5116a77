// Host metrics via sysinfo

use crate::error::UsageError;
use crate::models::HostReading;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Networks, System};
use tracing::instrument;

/// Window the per-core CPU load is measured over. [`capture_host_sample`]
/// blocks for roughly this long on a worker thread.
///
/// [`capture_host_sample`]: SysinfoRepo::capture_host_sample
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    networks: Arc<std::sync::Mutex<Networks>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            networks: Arc::new(std::sync::Mutex::new(networks)),
        }
    }

    /// One raw host reading: per-core CPU load measured across
    /// [`CPU_SAMPLE_WINDOW`], memory percent, and cumulative network byte
    /// counters summed over all interfaces.
    ///
    /// This is the system's only intentional blocking delay: the call takes
    /// about one second while the CPU deltas accumulate.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "capture_host_sample"))]
    pub async fn capture_host_sample(&self) -> Result<HostReading, UsageError> {
        let sys = self.sys.clone();
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys.lock().map_err(|e| {
                UsageError::MetricsUnavailable(format!("sysinfo lock poisoned: {}", e))
            })?;
            sys.refresh_cpu_all();
            std::thread::sleep(CPU_SAMPLE_WINDOW);
            sys.refresh_cpu_all();

            let cpu_per_core: Vec<f64> = sys
                .cpus()
                .iter()
                .map(|c| (c.cpu_usage() as f64).clamp(0.0, 100.0))
                .collect();
            if cpu_per_core.is_empty() {
                return Err(UsageError::MetricsUnavailable(
                    "no logical cores reported".into(),
                ));
            }

            sys.refresh_memory();
            let total = sys.total_memory();
            let available = sys.available_memory();
            let used = total.saturating_sub(available);
            let memory_percent = if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            };

            let mut networks_guard = networks.lock().map_err(|e| {
                UsageError::MetricsUnavailable(format!("sysinfo networks lock poisoned: {}", e))
            })?;
            networks_guard.refresh(true);
            let mut network_rx_bytes = 0u64;
            let mut network_tx_bytes = 0u64;
            for (_name, data) in networks_guard.list() {
                network_rx_bytes += data.total_received();
                network_tx_bytes += data.total_transmitted();
            }

            Ok(HostReading {
                cpu_per_core,
                memory_percent,
                network_rx_bytes,
                network_tx_bytes,
            })
        })
        .await
        .map_err(|e| UsageError::MetricsUnavailable(format!("sysinfo task join: {}", e)))?
    }
}

// Live-read and historical paths over the metrics source and sample store

use crate::error::UsageError;
use crate::history_repo::{HistoryRepo, aggregation};
use crate::models::{AggregateSummary, UsageSample};
use crate::sysinfo_repo::SysinfoRepo;
use std::sync::Arc;

const BYTES_PER_MIB: f64 = 1_048_576.0;

pub struct UsageService {
    sysinfo_repo: Arc<SysinfoRepo>,
    history_repo: Arc<HistoryRepo>,
}

impl UsageService {
    pub fn new(sysinfo_repo: Arc<SysinfoRepo>, history_repo: Arc<HistoryRepo>) -> Self {
        Self {
            sysinfo_repo,
            history_repo,
        }
    }

    /// Capture a live reading, persist it, and return the just-captured
    /// sample (not re-read from storage). Blocks for the CPU sampling window
    /// (see [`SysinfoRepo::capture_host_sample`]).
    ///
    /// A failed append is logged and the reading is still served; a failed
    /// capture is fatal to the request.
    pub async fn get_current(&self) -> Result<UsageSample, UsageError> {
        let reading = self.sysinfo_repo.capture_host_sample().await?;
        let sample = UsageSample {
            timestamp: unix_now_secs(),
            cpu_per_core: reading.cpu_per_core,
            memory_percent: reading.memory_percent,
            network_rx_mib: reading.network_rx_bytes as f64 / BYTES_PER_MIB,
            network_tx_mib: reading.network_tx_bytes as f64 / BYTES_PER_MIB,
        };
        if let Err(e) = self.history_repo.append(&sample).await {
            tracing::warn!(error = %e, "sample append failed, serving live reading anyway");
        }
        Ok(sample)
    }

    /// Reduce the full stored history into one summary. A scan failure
    /// surfaces directly; there is no reading to fall back to.
    pub async fn get_historical(&self) -> Result<AggregateSummary, UsageError> {
        let samples = self.history_repo.scan_all().await?;
        aggregation::aggregate_samples(&samples)
    }
}

fn unix_now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

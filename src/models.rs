// Domain and wire types for host and container usage

use serde::{Deserialize, Serialize};

/// One raw reading from the host, before timestamping and unit conversion.
/// The byte counters are cumulative totals since boot, not per-interval rates.
#[derive(Debug, Clone)]
pub struct HostReading {
    pub cpu_per_core: Vec<f64>,
    pub memory_percent: f64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
}

/// One persisted usage row. Immutable once stored; the store is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSample {
    /// Seconds since epoch, assigned at capture time.
    pub timestamp: i64,
    /// One entry per logical core. Never empty when stored; width may differ
    /// between samples taken on different hardware.
    pub cpu_per_core: Vec<f64>,
    pub memory_percent: f64,
    /// Cumulative MiB received since host boot at capture time.
    pub network_rx_mib: f64,
    /// Cumulative MiB transmitted since host boot at capture time.
    pub network_tx_mib: f64,
}

/// All-time reduction of the stored history. Computed fresh per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSummary {
    pub cpu_per_core_avg: Vec<f64>,
    pub memory_percent_avg: f64,
    /// Sum of the stored cumulative rx counters (a sum, not a mean).
    pub network_rx_total: f64,
    pub network_tx_total: f64,
}

/// Wire shape for GET /api/data, shared by both timeframes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageReport {
    pub cpu_per_core: Vec<f64>,
    pub memory: f64,
    pub network: NetworkTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkTotals {
    pub rx: f64,
    pub tx: f64,
}

impl From<UsageSample> for UsageReport {
    fn from(s: UsageSample) -> Self {
        Self {
            cpu_per_core: s.cpu_per_core,
            memory: s.memory_percent,
            network: NetworkTotals {
                rx: s.network_rx_mib,
                tx: s.network_tx_mib,
            },
        }
    }
}

impl From<AggregateSummary> for UsageReport {
    fn from(a: AggregateSummary) -> Self {
        Self {
            cpu_per_core: a.cpu_per_core_avg,
            memory: a.memory_percent_avg,
            network: NetworkTotals {
                rx: a.network_rx_total,
                tx: a.network_tx_total,
            },
        }
    }
}

/// Point-in-time resource usage for one running container. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerUsage {
    pub name: String,
    pub cpu_percent: f64,
    pub memory_usage_mib: f64,
    pub memory_percent: f64,
}

/// Wire row for GET /api/high-usage. Percentages and MiB are pre-formatted
/// to two decimals for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerUsageRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CPUPerc")]
    pub cpu_perc: String,
    #[serde(rename = "MemUsage")]
    pub mem_usage: String,
    #[serde(rename = "MemPerc")]
    pub mem_perc: String,
}

impl From<ContainerUsage> for ContainerUsageRow {
    fn from(c: ContainerUsage) -> Self {
        Self {
            name: c.name,
            cpu_perc: format!("{:.2}%", c.cpu_percent),
            mem_usage: format!("{:.2} MiB", c.memory_usage_mib),
            mem_perc: format!("{:.2}%", c.memory_percent),
        }
    }
}

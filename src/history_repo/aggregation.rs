// All-time reduction of stored samples. Pure; DB access stays in the parent.

use crate::error::UsageError;
use crate::models::{AggregateSummary, UsageSample};

/// Reduce a full scan of the store into one summary.
///
/// Per-core averages use the width of the first sample; a later sample with
/// a different core count fails the whole aggregation rather than silently
/// truncating or padding. rx/tx stay sums of the stored cumulative counters
/// and are never divided by the sample count.
pub fn aggregate_samples(samples: &[UsageSample]) -> Result<AggregateSummary, UsageError> {
    if samples.is_empty() {
        return Ok(AggregateSummary {
            cpu_per_core_avg: vec![],
            memory_percent_avg: 0.0,
            network_rx_total: 0.0,
            network_tx_total: 0.0,
        });
    }

    let width = samples[0].cpu_per_core.len();
    let mut cpu_sums = vec![0.0f64; width];
    let mut memory_sum = 0.0f64;
    let mut rx_sum = 0.0f64;
    let mut tx_sum = 0.0f64;

    for sample in samples {
        if sample.cpu_per_core.len() != width {
            return Err(UsageError::InconsistentCoreCount {
                expected: width,
                got: sample.cpu_per_core.len(),
            });
        }
        for (acc, v) in cpu_sums.iter_mut().zip(&sample.cpu_per_core) {
            *acc += v;
        }
        memory_sum += sample.memory_percent;
        rx_sum += sample.network_rx_mib;
        tx_sum += sample.network_tx_mib;
    }

    let total = samples.len() as f64;
    Ok(AggregateSummary {
        cpu_per_core_avg: cpu_sums.into_iter().map(|s| round2(s / total)).collect(),
        memory_percent_avg: round2(memory_sum / total),
        network_rx_total: round2(rx_sum),
        network_tx_total: round2(tx_sum),
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

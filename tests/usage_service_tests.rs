// Usage service tests: live path persists, availability over durability,
// historical path. Live reads exercise the real sysinfo source and block
// for the ~1 s CPU sampling window each.

use hostmon::error::UsageError;
use hostmon::history_repo::HistoryRepo;
use hostmon::models::UsageSample;
use hostmon::sysinfo_repo::SysinfoRepo;
use hostmon::usage_service::UsageService;
use std::sync::Arc;
use tempfile::TempDir;

fn sample(cpu: &[f64], memory: f64, rx: f64, tx: f64) -> UsageSample {
    UsageSample {
        timestamp: 0,
        cpu_per_core: cpu.to_vec(),
        memory_percent: memory,
        network_rx_mib: rx,
        network_tx_mib: tx,
    }
}

#[tokio::test]
async fn get_current_returns_and_persists_a_sample() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let history = Arc::new(HistoryRepo::new(path.to_str().unwrap()).unwrap());
    history.init().await.unwrap();
    let service = UsageService::new(Arc::new(SysinfoRepo::new()), history.clone());

    let reading = service.get_current().await.unwrap();
    assert!(!reading.cpu_per_core.is_empty());
    assert!(reading.memory_percent >= 0.0 && reading.memory_percent <= 100.0);
    assert!(reading.network_rx_mib >= 0.0);
    assert!(reading.timestamp > 0);

    let rows = history.scan_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.last().unwrap(), &reading);
}

#[tokio::test]
async fn get_current_survives_append_failure() {
    // The database path is a directory: every append fails. The live
    // reading must still be served.
    let dir = TempDir::new().unwrap();
    let history = Arc::new(HistoryRepo::new(dir.path().to_str().unwrap()).unwrap());
    let service = UsageService::new(Arc::new(SysinfoRepo::new()), history);

    let reading = service.get_current().await.unwrap();
    assert!(!reading.cpu_per_core.is_empty());
}

#[tokio::test]
async fn get_historical_reduces_appended_samples() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let history = Arc::new(HistoryRepo::new(path.to_str().unwrap()).unwrap());
    history.init().await.unwrap();

    history.append(&sample(&[10.0, 20.0], 10.0, 1.0, 0.5)).await.unwrap();
    history.append(&sample(&[30.0, 40.0], 20.0, 2.0, 0.5)).await.unwrap();
    history.append(&sample(&[50.0, 60.0], 30.0, 3.0, 0.5)).await.unwrap();

    let service = UsageService::new(Arc::new(SysinfoRepo::new()), history);
    let summary = service.get_historical().await.unwrap();
    assert_eq!(summary.cpu_per_core_avg, vec![30.0, 40.0]);
    assert_eq!(summary.memory_percent_avg, 20.0);
    assert_eq!(summary.network_rx_total, 6.0);
    assert_eq!(summary.network_tx_total, 1.5);
}

#[tokio::test]
async fn get_historical_on_empty_store_returns_zero_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let history = Arc::new(HistoryRepo::new(path.to_str().unwrap()).unwrap());
    history.init().await.unwrap();

    let service = UsageService::new(Arc::new(SysinfoRepo::new()), history);
    let summary = service.get_historical().await.unwrap();
    assert!(summary.cpu_per_core_avg.is_empty());
    assert_eq!(summary.memory_percent_avg, 0.0);
    assert_eq!(summary.network_rx_total, 0.0);
    assert_eq!(summary.network_tx_total, 0.0);
}

#[tokio::test]
async fn get_historical_surfaces_store_failure() {
    // No fallback on the historical path: a scan failure is the caller's.
    let dir = TempDir::new().unwrap();
    let history = Arc::new(HistoryRepo::new(dir.path().to_str().unwrap()).unwrap());
    let service = UsageService::new(Arc::new(SysinfoRepo::new()), history);

    match service.get_historical().await.unwrap_err() {
        UsageError::Persistence(_) => {}
        other => panic!("unexpected error: {other}"),
    }
}

// Sample store tests: init, append/scan round trip, insertion order, per-call connections

use hostmon::error::UsageError;
use hostmon::history_repo::HistoryRepo;
use hostmon::models::UsageSample;
use tempfile::TempDir;

fn sample(timestamp: i64, cpu: &[f64]) -> UsageSample {
    UsageSample {
        timestamp,
        cpu_per_core: cpu.to_vec(),
        memory_percent: 42.5,
        network_rx_mib: 1234.56,
        network_tx_mib: 78.9,
    }
}

#[tokio::test]
async fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let repo = HistoryRepo::new(path.to_str().unwrap()).unwrap();
    repo.init().await.unwrap();
    // Second init is a no-op (IF NOT EXISTS)
    repo.init().await.unwrap();
}

#[tokio::test]
async fn scan_on_empty_store_returns_empty_vec() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let repo = HistoryRepo::new(path.to_str().unwrap()).unwrap();
    repo.init().await.unwrap();
    assert!(repo.scan_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_then_scan_round_trips_field_for_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let repo = HistoryRepo::new(path.to_str().unwrap()).unwrap();
    repo.init().await.unwrap();

    let s = sample(1_700_000_000, &[12.5, 7.25, 0.0]);
    repo.append(&s).await.unwrap();

    let rows = repo.scan_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.last().unwrap(), &s);
}

#[tokio::test]
async fn scan_returns_rows_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let repo = HistoryRepo::new(path.to_str().unwrap()).unwrap();
    repo.init().await.unwrap();

    // Insertion order wins, not timestamp order
    for ts in [30, 10, 20] {
        repo.append(&sample(ts, &[1.0])).await.unwrap();
    }
    let rows = repo.scan_all().await.unwrap();
    let timestamps: Vec<i64> = rows.iter().map(|r| r.timestamp).collect();
    assert_eq!(timestamps, vec![30, 10, 20]);
}

#[tokio::test]
async fn store_tolerates_samples_with_different_core_counts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");
    let repo = HistoryRepo::new(path.to_str().unwrap()).unwrap();
    repo.init().await.unwrap();

    repo.append(&sample(1, &[10.0, 20.0])).await.unwrap();
    repo.append(&sample(2, &[10.0, 20.0, 30.0, 40.0])).await.unwrap();

    let rows = repo.scan_all().await.unwrap();
    assert_eq!(rows[0].cpu_per_core.len(), 2);
    assert_eq!(rows[1].cpu_per_core.len(), 4);
}

#[tokio::test]
async fn store_reopens_existing_file_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.db");

    {
        let repo = HistoryRepo::new(path.to_str().unwrap()).unwrap();
        repo.init().await.unwrap();
        repo.append(&sample(99, &[5.0])).await.unwrap();
    }

    let reopened = HistoryRepo::new(path.to_str().unwrap()).unwrap();
    reopened.init().await.unwrap();
    let rows = reopened.scan_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timestamp, 99);
}

#[tokio::test]
async fn append_against_unopenable_path_is_persistence_error() {
    // A directory where the database file should be: every connect fails.
    let dir = TempDir::new().unwrap();
    let repo = HistoryRepo::new(dir.path().to_str().unwrap()).unwrap();
    match repo.append(&sample(1, &[1.0])).await.unwrap_err() {
        UsageError::Persistence(_) => {}
        other => panic!("unexpected error: {other}"),
    }
}

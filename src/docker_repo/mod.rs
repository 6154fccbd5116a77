// Live container usage via bollard. One non-streaming stats read per
// container; any per-container failure aborts the whole listing.

mod stats;

use crate::error::UsageError;
use crate::models::ContainerUsage;
use bollard::Docker;
use bollard::query_parameters::{ListContainersOptions, StatsOptions};
use futures_util::StreamExt;
use std::collections::HashMap;
use tracing::instrument;

pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    /// The client is constructed by the caller and injected, so tests and
    /// alternate transports can supply their own.
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// One point-in-time usage snapshot per running container. A list
    /// failure is RuntimeUnavailable; a failure reading any single
    /// container's stats aborts the entire call with no partial results.
    #[instrument(skip(self), fields(repo = "docker", operation = "list_container_usage"))]
    pub async fn list_container_usage(&self) -> Result<Vec<ContainerUsage>, UsageError> {
        let mut filters = HashMap::new();
        filters.insert("status".to_string(), vec!["running".to_string()]);

        let filter = ListContainersOptions {
            all: false,
            filters: Some(filters),
            ..Default::default()
        };

        let containers = self
            .docker
            .list_containers(Some(filter))
            .await
            .map_err(UsageError::RuntimeUnavailable)?;

        let mut out = Vec::with_capacity(containers.len());
        for c in &containers {
            let id = c.id.as_ref().cloned().unwrap_or_default();
            let name = c
                .names
                .as_ref()
                .and_then(|n| n.first())
                .cloned()
                .unwrap_or_else(|| id.clone());
            let name = name.trim_start_matches('/').to_string();
            out.push(self.fetch_usage(&id, &name).await?);
        }
        Ok(out)
    }

    async fn fetch_usage(&self, id: &str, name: &str) -> Result<ContainerUsage, UsageError> {
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = self.docker.stats(id, Some(options));
        let response = match stream.next().await {
            Some(Ok(r)) => r,
            Some(Err(e)) => {
                return Err(UsageError::ContainerStats {
                    name: name.to_string(),
                    reason: e.to_string(),
                });
            }
            None => {
                return Err(UsageError::ContainerStats {
                    name: name.to_string(),
                    reason: "stats stream ended without a snapshot".into(),
                });
            }
        };
        stats::usage_from_stats(&response, name).ok_or_else(|| UsageError::ContainerStats {
            name: name.to_string(),
            reason: "snapshot missing CPU accounting windows".into(),
        })
    }
}

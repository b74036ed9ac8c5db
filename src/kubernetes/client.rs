use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{PersistentVolume, PersistentVolumeClaim};
use k8s_openapi::api::storage::v1::StorageClass;
use kube::api::{ApiResource, DynamicObject, GroupVersionKind, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use tracing::debug;

use super::resources::{
    PersistentVolumeClaimRecord, PersistentVolumeRecord, ReplicationGroupRecord,
    StorageClassRecord,
};
use super::{ClusterHandle, REPLICATION_API_GROUP};

/// Timeout for connecting to a cluster API
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for reading API responses
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// The `ReplicationGroup` custom resource, listed dynamically so the binary
/// does not need the CRD schema at compile time.
fn replication_group_resource() -> ApiResource {
    let gvk = GroupVersionKind::gvk(REPLICATION_API_GROUP, "v1", "ReplicationGroup");
    ApiResource::from_gvk_with_plural(&gvk, "replicationgroups")
}

/// A connection to a single managed cluster.
pub struct ClusterClient {
    id: String,
    client: Client,
}

impl ClusterClient {
    /// Build a client from the cluster's kubeconfig file. Parses and
    /// validates the config; no API request is made until the first query.
    pub async fn from_kubeconfig(id: &str, path: &Path) -> Result<Self> {
        let kubeconfig = Kubeconfig::read_from(path)
            .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;

        let mut config =
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .with_context(|| format!("Failed to load kubeconfig for cluster '{}'", id))?;

        config.connect_timeout = Some(CONNECT_TIMEOUT);
        config.read_timeout = Some(READ_TIMEOUT);

        let client = Client::try_from(config)
            .with_context(|| format!("Failed to create client for cluster '{}'", id))?;

        Ok(Self {
            id: id.to_string(),
            client,
        })
    }
}

#[async_trait]
impl ClusterHandle for ClusterClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn storage_classes(&self) -> Result<Vec<StorageClassRecord>> {
        debug!(cluster = %self.id, "listing storage classes");
        let api: Api<StorageClass> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list storage classes on '{}'", self.id))?;
        Ok(list.items.into_iter().map(StorageClassRecord::from).collect())
    }

    async fn persistent_volumes(&self) -> Result<Vec<PersistentVolumeRecord>> {
        debug!(cluster = %self.id, "listing persistent volumes");
        let api: Api<PersistentVolume> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list persistent volumes on '{}'", self.id))?;
        Ok(list
            .items
            .into_iter()
            .map(PersistentVolumeRecord::from)
            .collect())
    }

    async fn persistent_volume_claims(&self) -> Result<Vec<PersistentVolumeClaimRecord>> {
        debug!(cluster = %self.id, "listing persistent volume claims");
        let api: Api<PersistentVolumeClaim> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await.with_context(|| {
            format!("Failed to list persistent volume claims on '{}'", self.id)
        })?;
        Ok(list
            .items
            .into_iter()
            .map(PersistentVolumeClaimRecord::from)
            .collect())
    }

    async fn replication_groups(&self) -> Result<Vec<ReplicationGroupRecord>> {
        debug!(cluster = %self.id, "listing replication groups");
        let ar = replication_group_resource();
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), &ar);
        let list = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list replication groups on '{}'", self.id))?;
        Ok(list
            .items
            .into_iter()
            .map(ReplicationGroupRecord::from)
            .collect())
    }
}

//! Typed records extracted from raw cluster objects.
//!
//! Each record carries only the attributes the inventory cares about:
//! identity, the storage driver, and the replication coordinates read from
//! the well-known annotation/label keys.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{PersistentVolume, PersistentVolumeClaim};
use k8s_openapi::api::storage::v1::StorageClass;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;

use super::{REMOTE_CLUSTER_ANNOTATION, REMOTE_NAMESPACE_ANNOTATION, REPLICATION_GROUP_LABEL};

/// A storage class as seen by the inventory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageClassRecord {
    pub name: String,
    /// Provisioner driver name
    pub driver: String,
    /// Raw storage class parameters, including replication markers
    pub parameters: BTreeMap<String, String>,
}

/// A persistent volume with its replication coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistentVolumeRecord {
    pub name: String,
    /// CSI driver backing the volume (empty for non-CSI volumes)
    pub driver: String,
    pub remote_cluster: String,
    pub remote_namespace: String,
    pub replication_group: String,
    /// Bound claim as `namespace/name`, empty if unbound
    pub claim: String,
    pub phase: String,
}

/// A persistent volume claim with its replication coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistentVolumeClaimRecord {
    pub name: String,
    pub namespace: String,
    pub remote_cluster: String,
    pub remote_namespace: String,
    pub replication_group: String,
    pub phase: String,
}

/// A replication group custom resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplicationGroupRecord {
    pub name: String,
    pub driver: String,
    pub remote_cluster: String,
    pub state: String,
}

fn annotation(meta: &ObjectMeta, key: &str) -> String {
    meta.annotations
        .as_ref()
        .and_then(|a| a.get(key))
        .cloned()
        .unwrap_or_default()
}

fn label(meta: &ObjectMeta, key: &str) -> String {
    meta.labels
        .as_ref()
        .and_then(|l| l.get(key))
        .cloned()
        .unwrap_or_default()
}

fn name(meta: &ObjectMeta) -> String {
    meta.name.clone().unwrap_or_default()
}

impl From<StorageClass> for StorageClassRecord {
    fn from(sc: StorageClass) -> Self {
        Self {
            name: name(&sc.metadata),
            driver: sc.provisioner,
            parameters: sc.parameters.unwrap_or_default(),
        }
    }
}

impl From<PersistentVolume> for PersistentVolumeRecord {
    fn from(pv: PersistentVolume) -> Self {
        let driver = pv
            .spec
            .as_ref()
            .and_then(|s| s.csi.as_ref())
            .map(|csi| csi.driver.clone())
            .unwrap_or_default();

        let claim = pv
            .spec
            .as_ref()
            .and_then(|s| s.claim_ref.as_ref())
            .map(|r| {
                format!(
                    "{}/{}",
                    r.namespace.as_deref().unwrap_or_default(),
                    r.name.as_deref().unwrap_or_default()
                )
            })
            .unwrap_or_default();

        let phase = pv
            .status
            .as_ref()
            .and_then(|s| s.phase.clone())
            .unwrap_or_default();

        Self {
            name: name(&pv.metadata),
            driver,
            remote_cluster: annotation(&pv.metadata, REMOTE_CLUSTER_ANNOTATION),
            remote_namespace: annotation(&pv.metadata, REMOTE_NAMESPACE_ANNOTATION),
            replication_group: label(&pv.metadata, REPLICATION_GROUP_LABEL),
            claim,
            phase,
        }
    }
}

impl From<PersistentVolumeClaim> for PersistentVolumeClaimRecord {
    fn from(pvc: PersistentVolumeClaim) -> Self {
        let phase = pvc
            .status
            .as_ref()
            .and_then(|s| s.phase.clone())
            .unwrap_or_default();

        Self {
            name: name(&pvc.metadata),
            namespace: pvc.metadata.namespace.clone().unwrap_or_default(),
            remote_cluster: annotation(&pvc.metadata, REMOTE_CLUSTER_ANNOTATION),
            remote_namespace: annotation(&pvc.metadata, REMOTE_NAMESPACE_ANNOTATION),
            replication_group: label(&pvc.metadata, REPLICATION_GROUP_LABEL),
            phase,
        }
    }
}

impl From<DynamicObject> for ReplicationGroupRecord {
    fn from(obj: DynamicObject) -> Self {
        let str_at = |root: &str, field: &str| {
            obj.data
                .get(root)
                .and_then(|v| v.get(field))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            name: name(&obj.metadata),
            driver: str_at("spec", "driverName"),
            remote_cluster: str_at("spec", "remoteClusterId"),
            state: str_at("status", "state"),
        }
    }
}

mod client;
pub mod resources;

pub use client::ClusterClient;
pub use resources::{
    PersistentVolumeClaimRecord, PersistentVolumeRecord, ReplicationGroupRecord,
    StorageClassRecord,
};

use anyhow::Result;
use async_trait::async_trait;

/// API group of the replication custom resources and prefix of the
/// well-known replication marker keys.
pub const REPLICATION_API_GROUP: &str = "replication.storage.io";

/// Annotation carrying the counterpart cluster ID of a replicated volume or claim.
pub const REMOTE_CLUSTER_ANNOTATION: &str = "replication.storage.io/remote-cluster-id";

/// Annotation carrying the counterpart namespace of a replicated volume or claim.
pub const REMOTE_NAMESPACE_ANNOTATION: &str = "replication.storage.io/remote-namespace";

/// Label naming the replication group a volume or claim belongs to.
pub const REPLICATION_GROUP_LABEL: &str = "replication.storage.io/replication-group";

/// Storage class parameter marking replication-enabled provisioning.
pub const REPLICATION_ENABLED_PARAM: &str = "replication.storage.io/is-replication-enabled";

/// One typed query operation per resource kind against a single cluster.
///
/// Implemented by [`ClusterClient`] for real clusters; the runner only sees
/// this trait, so tests can substitute stubs.
#[async_trait]
pub trait ClusterHandle: Send + Sync {
    /// The cluster ID this handle is connected to
    fn id(&self) -> &str;

    async fn storage_classes(&self) -> Result<Vec<StorageClassRecord>>;

    async fn persistent_volumes(&self) -> Result<Vec<PersistentVolumeRecord>>;

    /// Claims across all namespaces; namespace selection is a filter concern
    async fn persistent_volume_claims(&self) -> Result<Vec<PersistentVolumeClaimRecord>>;

    async fn replication_groups(&self) -> Result<Vec<ReplicationGroupRecord>>;
}

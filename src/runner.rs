// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Multi-cluster query execution.
//!
//! Resolves the requested cluster set, then queries and filters one cluster
//! at a time. A failing cluster is recorded in the report and never aborts
//! the remaining clusters; only cluster-set resolution itself is fatal.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::filter::{self, FilterCriteria, KindFilter};
use crate::kubernetes::{
    ClusterHandle, PersistentVolumeClaimRecord, PersistentVolumeRecord, ReplicationGroupRecord,
    StorageClassRecord,
};

/// Matching records of one kind, as returned for a single cluster.
#[derive(Debug)]
pub enum RecordSet {
    StorageClasses(Vec<StorageClassRecord>),
    PersistentVolumes(Vec<PersistentVolumeRecord>),
    PersistentVolumeClaims(Vec<PersistentVolumeClaimRecord>),
    ReplicationGroups(Vec<ReplicationGroupRecord>),
}

impl RecordSet {
    pub fn len(&self) -> usize {
        match self {
            RecordSet::StorageClasses(v) => v.len(),
            RecordSet::PersistentVolumes(v) => v.len(),
            RecordSet::PersistentVolumeClaims(v) => v.len(),
            RecordSet::ReplicationGroups(v) => v.len(),
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result for one cluster: either the matching records or the query error.
#[derive(Debug)]
pub struct ClusterEntry {
    pub cluster_id: String,
    pub result: Result<RecordSet>,
}

/// Aggregate result over the resolved cluster set, in resolution order.
/// Entries are independent; a failed sibling never removes a successful one.
#[derive(Debug, Default)]
pub struct ClusterReport {
    pub entries: Vec<ClusterEntry>,
}

/// Resolves requested cluster IDs into connection handles. An empty request
/// resolves every configured cluster.
#[async_trait]
pub trait ClusterResolver: Send + Sync {
    async fn resolve(&self, ids: &[String]) -> Result<Vec<Arc<dyn ClusterHandle>>>;
}

pub struct MultiClusterRunner<'a> {
    resolver: &'a dyn ClusterResolver,
}

impl<'a> MultiClusterRunner<'a> {
    pub fn new(resolver: &'a dyn ClusterResolver) -> Self {
        Self { resolver }
    }

    /// Query and filter the criteria's resource kind on every resolved
    /// cluster, sequentially, in resolution order. No retries.
    pub async fn run(
        &self,
        cluster_ids: &[String],
        criteria: &FilterCriteria,
    ) -> Result<ClusterReport> {
        let handles = self
            .resolver
            .resolve(cluster_ids)
            .await
            .context("Failed to resolve cluster set")?;

        let mut report = ClusterReport {
            entries: Vec::with_capacity(handles.len()),
        };

        for handle in handles {
            let cluster_id = handle.id().to_string();
            let result = Self::query(handle.as_ref(), criteria).await;

            match &result {
                Ok(records) => {
                    debug!(cluster = %cluster_id, matched = records.len(), "query complete");
                }
                Err(e) => {
                    warn!(cluster = %cluster_id, error = %e, "query failed, continuing");
                }
            }

            report.entries.push(ClusterEntry { cluster_id, result });
        }

        Ok(report)
    }

    async fn query(handle: &dyn ClusterHandle, criteria: &FilterCriteria) -> Result<RecordSet> {
        let set = match &criteria.fields {
            KindFilter::StorageClasses(fields) => {
                let raw = handle.storage_classes().await?;
                RecordSet::StorageClasses(filter::apply(raw, criteria.all, fields))
            }
            KindFilter::PersistentVolumes(fields) => {
                let raw = handle.persistent_volumes().await?;
                RecordSet::PersistentVolumes(filter::apply(raw, criteria.all, fields))
            }
            KindFilter::PersistentVolumeClaims(fields) => {
                let raw = handle.persistent_volume_claims().await?;
                RecordSet::PersistentVolumeClaims(filter::apply(raw, criteria.all, fields))
            }
            KindFilter::ReplicationGroups(fields) => {
                let raw = handle.replication_groups().await?;
                RecordSet::ReplicationGroups(filter::apply(raw, criteria.all, fields))
            }
        };
        Ok(set)
    }
}

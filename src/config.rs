// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Cluster configuration store.
//!
//! Managed clusters live under ~/.replist/clusters/, one kubeconfig file per
//! cluster; the file stem is the cluster ID. Listing order is sorted so
//! resolution order is deterministic.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use kube::config::Kubeconfig;

use crate::kubernetes::{ClusterClient, ClusterHandle};
use crate::runner::ClusterResolver;

/// Get the base replist directory (~/.replist/)
pub fn base_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(".replist"))
        .context("Could not determine home directory")
}

/// Default directory of per-cluster kubeconfig files (~/.replist/clusters/)
pub fn default_clusters_dir() -> Result<PathBuf> {
    Ok(base_dir()?.join("clusters"))
}

/// A configured cluster, described without contacting its API server.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterInfo {
    pub id: String,
    /// API server URL from the kubeconfig, empty if the file carries none
    pub server: String,
    pub path: PathBuf,
}

/// Directory-backed store of cluster access configs.
pub struct ClusterConfigStore {
    dir: PathBuf,
}

impl ClusterConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// All configured cluster IDs with their kubeconfig paths, sorted by ID.
    /// Hidden files and subdirectories are ignored.
    fn cluster_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = std::fs::read_dir(&self.dir).with_context(|| {
            format!("Failed to read cluster config directory {}", self.dir.display())
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Failed to read cluster config directory {}", self.dir.display())
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.is_empty() || stem.starts_with('.') {
                continue;
            }
            files.push((stem.to_string(), path));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }

    /// Select the configs for the requested IDs, in request order. An empty
    /// request selects every configured cluster; an unknown ID is an error.
    fn select(&self, ids: &[String]) -> Result<Vec<(String, PathBuf)>> {
        let files = self.cluster_files()?;
        if ids.is_empty() {
            return Ok(files);
        }

        let mut selected = Vec::with_capacity(ids.len());
        for id in ids {
            let found = files
                .iter()
                .find(|(candidate, _)| candidate == id)
                .ok_or_else(|| {
                    anyhow!(
                        "Cluster '{}' not found in {}",
                        id,
                        self.dir.display()
                    )
                })?;
            selected.push(found.clone());
        }
        Ok(selected)
    }

    /// Describe every configured cluster for the cluster listing. Parses
    /// each kubeconfig but makes no API request.
    pub fn clusters(&self) -> Result<Vec<ClusterInfo>> {
        let mut infos = Vec::new();
        for (id, path) in self.cluster_files()? {
            let kubeconfig = Kubeconfig::read_from(&path)
                .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
            let server = kubeconfig
                .clusters
                .first()
                .and_then(|c| c.cluster.as_ref())
                .and_then(|c| c.server.clone())
                .unwrap_or_default();
            infos.push(ClusterInfo { id, server, path });
        }
        Ok(infos)
    }
}

#[async_trait]
impl ClusterResolver for ClusterConfigStore {
    async fn resolve(&self, ids: &[String]) -> Result<Vec<Arc<dyn ClusterHandle>>> {
        let selected = self.select(ids)?;
        if selected.is_empty() {
            return Err(anyhow!(
                "No clusters configured in {}",
                self.dir.display()
            ));
        }

        let mut handles: Vec<Arc<dyn ClusterHandle>> = Vec::with_capacity(selected.len());
        for (id, path) in selected {
            let client = ClusterClient::from_kubeconfig(&id, &path)
                .await
                .with_context(|| format!("Failed to initialize cluster '{}'", id))?;
            handles.push(Arc::new(client));
        }
        Ok(handles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const KUBECONFIG: &str = r#"apiVersion: v1
kind: Config
clusters:
- cluster:
    server: https://10.0.0.1:6443
  name: test
contexts:
- context:
    cluster: test
    user: test-admin
  name: test
current-context: test
users:
- name: test-admin
  user:
    token: sample
"#;

    fn store_with(files: &[&str]) -> (TempDir, ClusterConfigStore) {
        let dir = TempDir::new().unwrap();
        for file in files {
            fs::write(dir.path().join(file), KUBECONFIG).unwrap();
        }
        let store = ClusterConfigStore::new(dir.path());
        (dir, store)
    }

    fn ids(store: &ClusterConfigStore) -> Vec<String> {
        store
            .select(&[])
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn test_ids_are_sorted_file_stems() {
        let (_dir, store) = store_with(&["beta.yaml", "alpha"]);
        assert_eq!(ids(&store), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_hidden_files_and_dirs_ignored() {
        let (dir, store) = store_with(&["alpha"]);
        fs::write(dir.path().join(".hidden"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        assert_eq!(ids(&store), vec!["alpha"]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let store = ClusterConfigStore::new(dir.path().join("nope"));
        assert!(store.select(&[]).is_err());
    }

    #[test]
    fn test_select_empty_request_selects_all() {
        let (_dir, store) = store_with(&["alpha", "beta"]);
        let selected = store.select(&[]).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_preserves_request_order() {
        let (_dir, store) = store_with(&["alpha", "beta"]);
        let selected = store
            .select(&["beta".to_string(), "alpha".to_string()])
            .unwrap();
        let ids: Vec<&str> = selected.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_select_unknown_id_is_error() {
        let (_dir, store) = store_with(&["alpha"]);
        let err = store.select(&["missing".to_string()]).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_clusters_reads_server_url() {
        let (_dir, store) = store_with(&["alpha"]);
        let infos = store.clusters().unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].id, "alpha");
        assert_eq!(infos[0].server, "https://10.0.0.1:6443");
    }

    #[tokio::test]
    async fn test_resolve_unknown_id_is_fatal() {
        let (_dir, store) = store_with(&["alpha"]);
        let result = store.resolve(&["missing".to_string()]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_resolve_empty_store_is_fatal() {
        let (_dir, store) = store_with(&[]);
        let result = store.resolve(&[]).await;
        assert!(result.is_err());
    }
}

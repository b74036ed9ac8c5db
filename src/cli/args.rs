// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::filter::{
    FilterCriteria, KindFilter, PersistentVolumeClaimFilter, PersistentVolumeFilter,
    ReplicationGroupFilter, StorageClassFilter, predicate,
};

#[derive(Parser, Debug)]
#[command(name = "replist")]
#[command(author, version, about = "Inventory replication resources across Kubernetes clusters")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory of per-cluster kubeconfig files (default ~/.replist/clusters/)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Cluster IDs to inventory, comma-separated. Defaults to every configured cluster.
    #[arg(short, long, value_name = "IDS", value_delimiter = ',', global = true)]
    pub clusters: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Omit column headers in output
    #[arg(long, global = true)]
    pub no_headers: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List replication resources in the configured clusters
    Get {
        #[command(subcommand)]
        resource: Resource,
    },
}

#[derive(Subcommand, Debug)]
pub enum Resource {
    /// List storage classes with replication-capable drivers
    #[command(visible_aliases = ["storageclass", "storageclasses"])]
    Sc {
        /// Storage driver name to match
        #[arg(short, long, default_value = "")]
        driver: String,

        /// Show all objects (overrides other filters)
        #[arg(short = 'A', long)]
        all: bool,
    },

    /// List persistent volumes
    #[command(visible_aliases = ["persistentvolume", "persistentvolumes"])]
    Pv {
        /// Storage driver name to match
        #[arg(short, long, default_value = "")]
        driver: String,

        /// Remote cluster ID to match
        #[arg(long, value_name = "ID", default_value = "")]
        remote_cluster: String,

        /// Remote namespace to match
        #[arg(long, value_name = "NS", default_value = "")]
        remote_namespace: String,

        /// Replication group name to match
        #[arg(long, value_name = "NAME", default_value = "")]
        replication_group: String,

        /// Show all objects (overrides other filters)
        #[arg(short = 'A', long)]
        all: bool,
    },

    /// List persistent volume claims
    #[command(visible_aliases = ["persistentvolumeclaim", "persistentvolumeclaims"])]
    Pvc {
        /// Namespace of the claims to match
        #[arg(short, long, default_value = "")]
        namespace: String,

        /// Remote cluster ID to match
        #[arg(long, value_name = "ID", default_value = "")]
        remote_cluster: String,

        /// Remote namespace to match
        #[arg(long, value_name = "NS", default_value = "")]
        remote_namespace: String,

        /// Replication group name to match
        #[arg(long, value_name = "NAME", default_value = "")]
        replication_group: String,

        /// Show all objects (overrides other filters)
        #[arg(short = 'A', long)]
        all: bool,
    },

    /// List replication group custom resources
    #[command(visible_aliases = ["replicationgroup", "replicationgroups"])]
    Rg {
        /// Storage driver name to match
        #[arg(short, long, default_value = "")]
        driver: String,

        /// Remote cluster ID to match
        #[arg(long, value_name = "ID", default_value = "")]
        remote_cluster: String,

        /// Show all objects (overrides other filters)
        #[arg(short = 'A', long)]
        all: bool,
    },

    /// List the clusters currently managed by replist
    #[command(visible_alias = "clusters")]
    Cluster,
}

impl Resource {
    /// Bind the flag values into one explicit criteria value for this
    /// invocation. `None` for the cluster listing, which takes no filters.
    pub fn criteria(&self) -> Option<FilterCriteria> {
        match self {
            Resource::Sc { driver, all } => Some(FilterCriteria {
                all: *all,
                fields: KindFilter::StorageClasses(StorageClassFilter {
                    driver: predicate(driver),
                }),
            }),
            Resource::Pv {
                driver,
                remote_cluster,
                remote_namespace,
                replication_group,
                all,
            } => Some(FilterCriteria {
                all: *all,
                fields: KindFilter::PersistentVolumes(PersistentVolumeFilter {
                    driver: predicate(driver),
                    remote_cluster: predicate(remote_cluster),
                    remote_namespace: predicate(remote_namespace),
                    replication_group: predicate(replication_group),
                }),
            }),
            Resource::Pvc {
                namespace,
                remote_cluster,
                remote_namespace,
                replication_group,
                all,
            } => Some(FilterCriteria {
                all: *all,
                fields: KindFilter::PersistentVolumeClaims(PersistentVolumeClaimFilter {
                    namespace: predicate(namespace),
                    remote_cluster: predicate(remote_cluster),
                    remote_namespace: predicate(remote_namespace),
                    replication_group: predicate(replication_group),
                }),
            }),
            Resource::Rg {
                driver,
                remote_cluster,
                all,
            } => Some(FilterCriteria {
                all: *all,
                fields: KindFilter::ReplicationGroups(ReplicationGroupFilter {
                    driver: predicate(driver),
                    remote_cluster: predicate(remote_cluster),
                }),
            }),
            Resource::Cluster => None,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Yaml,
}

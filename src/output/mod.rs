mod csv;
mod json;
mod table;
mod yaml;

pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use table::TableFormatter;
pub use yaml::YamlFormatter;

use crate::cli::OutputFormat;
use crate::config::ClusterInfo;
use crate::kubernetes::REPLICATION_ENABLED_PARAM;
use crate::runner::{ClusterReport, RecordSet};

/// Tabular result handed to the formatters.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn format(&self, format: &OutputFormat, no_headers: bool) -> String {
        match format {
            OutputFormat::Table => TableFormatter::format(self, no_headers),
            OutputFormat::Json => JsonFormatter::format(self),
            OutputFormat::Csv => CsvFormatter::format(self, no_headers),
            OutputFormat::Yaml => YamlFormatter::format(self),
        }
    }

    /// Rows as column-keyed maps for the structured formats
    fn to_json_rows(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(col, val)| (col.clone(), serde_json::Value::String(val.clone())))
                    .collect()
            })
            .collect()
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn record_result(set: &RecordSet) -> QueryResult {
    match set {
        RecordSet::StorageClasses(records) => QueryResult {
            columns: columns(&["name", "driver", "replication"]),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.name.clone(),
                        r.driver.clone(),
                        r.parameters
                            .get(REPLICATION_ENABLED_PARAM)
                            .cloned()
                            .unwrap_or_default(),
                    ]
                })
                .collect(),
        },
        RecordSet::PersistentVolumes(records) => QueryResult {
            columns: columns(&[
                "name",
                "driver",
                "remote_cluster",
                "remote_namespace",
                "replication_group",
                "claim",
                "phase",
            ]),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.name.clone(),
                        r.driver.clone(),
                        r.remote_cluster.clone(),
                        r.remote_namespace.clone(),
                        r.replication_group.clone(),
                        r.claim.clone(),
                        r.phase.clone(),
                    ]
                })
                .collect(),
        },
        RecordSet::PersistentVolumeClaims(records) => QueryResult {
            columns: columns(&[
                "name",
                "namespace",
                "remote_cluster",
                "remote_namespace",
                "replication_group",
                "phase",
            ]),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.name.clone(),
                        r.namespace.clone(),
                        r.remote_cluster.clone(),
                        r.remote_namespace.clone(),
                        r.replication_group.clone(),
                        r.phase.clone(),
                    ]
                })
                .collect(),
        },
        RecordSet::ReplicationGroups(records) => QueryResult {
            columns: columns(&["name", "driver", "remote_cluster", "state"]),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.name.clone(),
                        r.driver.clone(),
                        r.remote_cluster.clone(),
                        r.state.clone(),
                    ]
                })
                .collect(),
        },
    }
}

/// Render the full report: one section per cluster in resolution order, a
/// blank line between sections. A failed cluster renders its error note in
/// place without suppressing sibling sections.
pub fn render_report(report: &ClusterReport, format: &OutputFormat, no_headers: bool) -> String {
    let sections: Vec<String> = report
        .entries
        .iter()
        .map(|entry| {
            let body = match &entry.result {
                Ok(set) => record_result(set).format(format, no_headers),
                Err(e) => format!("Error: {:#}", e),
            };
            format!("Cluster: {}\n{}", entry.cluster_id, body)
        })
        .collect();
    sections.join("\n\n")
}

/// Render the configured cluster listing.
pub fn render_cluster_list(
    clusters: &[ClusterInfo],
    format: &OutputFormat,
    no_headers: bool,
) -> String {
    let result = QueryResult {
        columns: columns(&["id", "api_server", "config"]),
        rows: clusters
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.server.clone(),
                    c.path.display().to_string(),
                ]
            })
            .collect(),
    };
    result.format(format, no_headers)
}

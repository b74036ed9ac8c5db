// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Predicate matching over replication resource records.
//!
//! Each resource kind declares its own applicable predicate set; a predicate
//! left unset is excluded from the conjunction. Matching is pure and
//! order-preserving.

use crate::kubernetes::{
    PersistentVolumeClaimRecord, PersistentVolumeRecord, ReplicationGroupRecord,
    StorageClassRecord,
};

/// Normalize a flag value into a predicate. Empty means "do not filter on
/// this field", which is distinct from matching a record whose field value
/// happens to be empty.
pub fn predicate(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn field_matches(pred: &Option<String>, value: &str) -> bool {
    pred.as_deref().map_or(true, |p| p == value)
}

/// Predicates applicable to storage classes.
#[derive(Debug, Clone, Default)]
pub struct StorageClassFilter {
    pub driver: Option<String>,
}

/// Predicates applicable to persistent volumes.
#[derive(Debug, Clone, Default)]
pub struct PersistentVolumeFilter {
    pub driver: Option<String>,
    pub remote_cluster: Option<String>,
    pub remote_namespace: Option<String>,
    pub replication_group: Option<String>,
}

/// Predicates applicable to persistent volume claims. Claims carry no driver;
/// the namespace predicate takes that slot.
#[derive(Debug, Clone, Default)]
pub struct PersistentVolumeClaimFilter {
    pub namespace: Option<String>,
    pub remote_cluster: Option<String>,
    pub remote_namespace: Option<String>,
    pub replication_group: Option<String>,
}

/// Predicates applicable to replication groups.
#[derive(Debug, Clone, Default)]
pub struct ReplicationGroupFilter {
    pub driver: Option<String>,
    pub remote_cluster: Option<String>,
}

/// Per-kind predicate sets. The variant selects the resource kind, so a
/// criteria/record mismatch is unrepresentable.
#[derive(Debug, Clone)]
pub enum KindFilter {
    StorageClasses(StorageClassFilter),
    PersistentVolumes(PersistentVolumeFilter),
    PersistentVolumeClaims(PersistentVolumeClaimFilter),
    ReplicationGroups(ReplicationGroupFilter),
}

/// Filter criteria for one invocation, built once from the CLI flags and
/// passed by parameter.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// When true, every predicate is bypassed and raw records are returned
    /// verbatim, even if the other flags carry stale non-empty values.
    pub all: bool,
    pub fields: KindFilter,
}

impl FilterCriteria {
    pub fn kind_name(&self) -> &'static str {
        match self.fields {
            KindFilter::StorageClasses(_) => "storage classes",
            KindFilter::PersistentVolumes(_) => "persistent volumes",
            KindFilter::PersistentVolumeClaims(_) => "persistent volume claims",
            KindFilter::ReplicationGroups(_) => "replication groups",
        }
    }
}

/// A record that can be matched against its kind's predicate set.
pub trait Matches {
    type Fields;

    fn matches(&self, fields: &Self::Fields) -> bool;
}

impl Matches for StorageClassRecord {
    type Fields = StorageClassFilter;

    fn matches(&self, fields: &StorageClassFilter) -> bool {
        field_matches(&fields.driver, &self.driver)
    }
}

impl Matches for PersistentVolumeRecord {
    type Fields = PersistentVolumeFilter;

    fn matches(&self, fields: &PersistentVolumeFilter) -> bool {
        field_matches(&fields.driver, &self.driver)
            && field_matches(&fields.remote_cluster, &self.remote_cluster)
            && field_matches(&fields.remote_namespace, &self.remote_namespace)
            && field_matches(&fields.replication_group, &self.replication_group)
    }
}

impl Matches for PersistentVolumeClaimRecord {
    type Fields = PersistentVolumeClaimFilter;

    fn matches(&self, fields: &PersistentVolumeClaimFilter) -> bool {
        field_matches(&fields.namespace, &self.namespace)
            && field_matches(&fields.remote_cluster, &self.remote_cluster)
            && field_matches(&fields.remote_namespace, &self.remote_namespace)
            && field_matches(&fields.replication_group, &self.replication_group)
    }
}

impl Matches for ReplicationGroupRecord {
    type Fields = ReplicationGroupFilter;

    fn matches(&self, fields: &ReplicationGroupFilter) -> bool {
        field_matches(&fields.driver, &self.driver)
            && field_matches(&fields.remote_cluster, &self.remote_cluster)
    }
}

/// Reduce records to the matching subset, preserving input order.
///
/// `all` bypasses the predicates entirely; an all-unset predicate set is a
/// vacuous conjunction and also returns every record.
pub fn apply<T: Matches>(records: Vec<T>, all: bool, fields: &T::Fields) -> Vec<T> {
    if all {
        return records;
    }
    records.into_iter().filter(|r| r.matches(fields)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sc(name: &str, driver: &str) -> StorageClassRecord {
        StorageClassRecord {
            name: name.to_string(),
            driver: driver.to_string(),
            ..Default::default()
        }
    }

    fn pv(name: &str, remote_cluster: &str) -> PersistentVolumeRecord {
        PersistentVolumeRecord {
            name: name.to_string(),
            driver: "d1".to_string(),
            remote_cluster: remote_cluster.to_string(),
            remote_namespace: "apps".to_string(),
            replication_group: "rg-1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_predicate_normalization() {
        assert_eq!(predicate(""), None);
        assert_eq!(predicate("d1"), Some("d1".to_string()));
    }

    #[test]
    fn test_all_flag_returns_records_unchanged() {
        let records = vec![sc("sc1", "d1"), sc("sc2", "d2")];
        // Stale non-empty predicate must not matter when `all` is set
        let fields = StorageClassFilter {
            driver: predicate("d1"),
        };
        let result = apply(records.clone(), true, &fields);
        assert_eq!(result, records);
    }

    #[test]
    fn test_all_flag_with_empty_records() {
        let records: Vec<StorageClassRecord> = vec![];
        let result = apply(records, true, &StorageClassFilter::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_vacuous_conjunction_returns_all() {
        let records = vec![pv("pv-1", "c2"), pv("pv-2", "c3")];
        let result = apply(records.clone(), false, &PersistentVolumeFilter::default());
        assert_eq!(result, records);
    }

    #[test]
    fn test_zero_records_zero_matches() {
        let records: Vec<PersistentVolumeRecord> = vec![];
        let fields = PersistentVolumeFilter {
            remote_cluster: predicate("c2"),
            ..Default::default()
        };
        assert!(apply(records, false, &fields).is_empty());
    }

    #[test]
    fn test_pv_remote_cluster_match() {
        let records = vec![pv("pv-1", "c2")];
        let fields = PersistentVolumeFilter {
            remote_cluster: predicate("c2"),
            ..Default::default()
        };
        assert_eq!(apply(records.clone(), false, &fields).len(), 1);

        let fields = PersistentVolumeFilter {
            remote_cluster: predicate("c3"),
            ..Default::default()
        };
        assert!(apply(records, false, &fields).is_empty());
    }

    #[test]
    fn test_pv_conjunction_of_set_predicates() {
        let records = vec![pv("pv-1", "c2")];
        // remote cluster matches, replication group does not
        let fields = PersistentVolumeFilter {
            remote_cluster: predicate("c2"),
            replication_group: predicate("rg-other"),
            ..Default::default()
        };
        assert!(apply(records, false, &fields).is_empty());
    }

    #[test]
    fn test_empty_predicate_distinct_from_empty_field() {
        // A record whose remote cluster is empty is still returned when the
        // predicate is unset, and excluded when the predicate is set
        let records = vec![pv("pv-1", "")];
        assert_eq!(
            apply(records.clone(), false, &PersistentVolumeFilter::default()).len(),
            1
        );
        let fields = PersistentVolumeFilter {
            remote_cluster: predicate("c2"),
            ..Default::default()
        };
        assert!(apply(records, false, &fields).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let records = vec![pv("a", "c2"), pv("b", "c2"), pv("c", "c2")];
        let fields = PersistentVolumeFilter {
            remote_cluster: predicate("c2"),
            ..Default::default()
        };
        let names: Vec<String> = apply(records, false, &fields)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_storage_class_driver_match() {
        let records = vec![sc("sc1", "d1"), sc("sc2", "d2")];
        let fields = StorageClassFilter {
            driver: predicate("d1"),
        };
        let result = apply(records, false, &fields);
        assert_eq!(result, vec![sc("sc1", "d1")]);
    }

    #[test]
    fn test_pvc_namespace_takes_driver_slot() {
        let claim = |ns: &str| PersistentVolumeClaimRecord {
            name: "data-0".to_string(),
            namespace: ns.to_string(),
            remote_cluster: "c2".to_string(),
            ..Default::default()
        };
        let records = vec![claim("apps"), claim("infra")];
        let fields = PersistentVolumeClaimFilter {
            namespace: predicate("apps"),
            remote_cluster: predicate("c2"),
            ..Default::default()
        };
        let result = apply(records, false, &fields);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].namespace, "apps");
    }

    #[test]
    fn test_rg_matches_driver_and_remote_cluster_only() {
        let rg = ReplicationGroupRecord {
            name: "rg-1".to_string(),
            driver: "d1".to_string(),
            remote_cluster: "c2".to_string(),
            state: "Synchronized".to_string(),
        };
        let fields = ReplicationGroupFilter {
            driver: predicate("d1"),
            remote_cluster: predicate("c2"),
        };
        assert_eq!(apply(vec![rg.clone()], false, &fields).len(), 1);

        let fields = ReplicationGroupFilter {
            driver: predicate("d2"),
            remote_cluster: predicate("c2"),
        };
        assert!(apply(vec![rg], false, &fields).is_empty());
    }

    #[test]
    fn test_kind_name() {
        let criteria = FilterCriteria {
            all: false,
            fields: KindFilter::StorageClasses(StorageClassFilter::default()),
        };
        assert_eq!(criteria.kind_name(), "storage classes");

        let criteria = FilterCriteria {
            all: false,
            fields: KindFilter::ReplicationGroups(ReplicationGroupFilter::default()),
        };
        assert_eq!(criteria.kind_name(), "replication groups");
    }
}

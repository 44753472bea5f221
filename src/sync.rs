//! Persistence-sync planning for the write direction.
//!
//! The engine never talks to storage itself; it turns an incoming batch of
//! project payloads plus the currently persisted row ids into a plan the web
//! layer executes. Semantics are replace-by-full-snapshot, not incremental
//! patch: a persisted row whose id is absent from the latest incoming set
//! for its project is deleted.

use crate::model::{Locality, Project};
use crate::resolve::{order_projects, RankedProject};
use crate::text::slugify;
use serde::Serialize;
use std::collections::HashMap;

/// Persisted state the storage layer reports before a sync.
#[derive(Debug, Clone, Default)]
pub struct ExistingStore {
    /// Persisted locality row ids per project id.
    pub locality_ids: HashMap<String, Vec<String>>,
    /// Public keys already taken (all projects, not only the batch).
    pub taken_keys: Vec<String>,
}

/// Plan for one project's locality rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityPlan {
    pub updates: Vec<RowMatch>,
    pub creates: Vec<String>,
    pub deletes: Vec<String>,
}

/// An incoming locality matched to a persisted row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowMatch {
    pub existing_id: String,
    pub incoming_id: String,
    /// Matched through the legacy numeric-suffix form rather than exactly.
    pub legacy: bool,
}

/// Plan for one project row of the batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub id: String,
    pub name: String,
    /// Externally addressable slug, unique across the store.
    pub public_key: String,
    /// Persisted sort key from the hierarchy order.
    pub sort_rank: usize,
    pub localities: LocalityPlan,
}

/// Full plan for an incoming batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPlan {
    pub projects: Vec<ProjectPlan>,
}

/// Plan the persistence of an incoming batch against the existing store.
#[must_use]
pub fn plan_batch_sync(existing: &ExistingStore, batch: &[&Project]) -> BatchPlan {
    let ranks: HashMap<String, usize> = order_projects(batch)
        .into_iter()
        .map(|r: RankedProject| (r.id, r.rank))
        .collect();

    let mut taken: Vec<String> = existing.taken_keys.clone();
    let mut projects = Vec::with_capacity(batch.len());

    for project in batch {
        let public_key = assign_public_key(project, &mut taken);
        let persisted = existing
            .locality_ids
            .get(&project.id)
            .map_or(&[][..], Vec::as_slice);
        projects.push(ProjectPlan {
            id: project.id.clone(),
            name: project.name.clone(),
            public_key,
            sort_rank: ranks.get(&project.id).copied().unwrap_or(0),
            localities: plan_locality_sync(persisted, &project.localities),
        });
    }

    BatchPlan { projects }
}

/// Match an incoming locality snapshot against persisted row ids.
///
/// Matching order per incoming row: exact id, then the legacy
/// numeric-suffix form (an incoming `"floor-12"` claims a persisted bare
/// `"12"`, left over from writers that keyed rows by database id). Each
/// persisted row is claimed at most once; whatever stays unclaimed is
/// deleted, unmatched incoming rows are created.
#[must_use]
pub fn plan_locality_sync(existing_ids: &[String], incoming: &[Locality]) -> LocalityPlan {
    let mut claimed: Vec<bool> = vec![false; existing_ids.len()];
    let mut plan = LocalityPlan::default();

    // Exact ids first, so a legacy match can never steal a row that another
    // incoming locality names precisely.
    let mut pending: Vec<&Locality> = Vec::new();
    for locality in incoming {
        let exact = (0..existing_ids.len()).find(|&i| !claimed[i] && existing_ids[i] == locality.id);
        match exact {
            Some(i) => {
                claimed[i] = true;
                plan.updates.push(RowMatch {
                    existing_id: existing_ids[i].clone(),
                    incoming_id: locality.id.clone(),
                    legacy: false,
                });
            }
            None => pending.push(locality),
        }
    }

    for locality in pending {
        let legacy = legacy_suffix(&locality.id).and_then(|digits| {
            (0..existing_ids.len()).find(|&i| !claimed[i] && existing_ids[i] == digits)
        });
        match legacy {
            Some(i) => {
                claimed[i] = true;
                plan.updates.push(RowMatch {
                    existing_id: existing_ids[i].clone(),
                    incoming_id: locality.id.clone(),
                    legacy: true,
                });
            }
            None => plan.creates.push(locality.id.clone()),
        }
    }

    plan.deletes = existing_ids
        .iter()
        .zip(&claimed)
        .filter(|(_, &was_claimed)| !was_claimed)
        .map(|(id, _)| id.clone())
        .collect();

    plan
}

// Digits after the last '-', when the id actually has a dashed tail.
fn legacy_suffix(id: &str) -> Option<&str> {
    let (_, tail) = id.rsplit_once('-')?;
    (!tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit())).then_some(tail)
}

/// Derive the project's public key: an explicit key wins, otherwise the name
/// is slugified; collisions are disambiguated by a numeric suffix. The
/// chosen key is appended to `taken`.
fn assign_public_key(project: &Project, taken: &mut Vec<String>) -> String {
    let base = project
        .public_key
        .as_deref()
        .map(slugify)
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| {
            let slug = slugify(&project.name);
            if slug.is_empty() {
                "map".to_string()
            } else {
                slug
            }
        });

    let mut candidate = base.clone();
    let mut suffix = 2;
    while taken.iter().any(|k| k == &candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    taken.push(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn locality(id: &str) -> Locality {
        Locality {
            id: id.into(),
            name: id.into(),
            unit_type: "byt".into(),
            status_id: None,
            status_label: None,
            area: None,
            price: None,
            rent: None,
            detail_url: None,
            designation: None,
        }
    }

    fn ids(v: &[String]) -> Vec<&str> {
        v.iter().map(String::as_str).collect()
    }

    #[test]
    fn exact_matches_win_before_legacy_suffix() {
        let existing = vec!["floor-1".to_string(), "12".to_string(), "old".to_string()];
        let incoming = vec![locality("floor-1"), locality("floor-12"), locality("floor-9")];
        let plan = plan_locality_sync(&existing, &incoming);

        assert_eq!(
            plan.updates,
            vec![
                RowMatch { existing_id: "floor-1".into(), incoming_id: "floor-1".into(), legacy: false },
                RowMatch { existing_id: "12".into(), incoming_id: "floor-12".into(), legacy: true },
            ]
        );
        assert_eq!(ids(&plan.creates), vec!["floor-9"]);
        assert_eq!(ids(&plan.deletes), vec!["old"]);
    }

    #[test]
    fn full_snapshot_deletes_everything_on_empty_incoming() {
        let existing = vec!["a".to_string(), "b".to_string()];
        let plan = plan_locality_sync(&existing, &[]);
        assert_eq!(ids(&plan.deletes), vec!["a", "b"]);
        assert!(plan.updates.is_empty() && plan.creates.is_empty());
    }

    #[test]
    fn public_keys_slugify_and_disambiguate() {
        let store = ExistingStore {
            locality_ids: HashMap::new(),
            taken_keys: vec!["rezidence-u-reky".to_string()],
        };
        let a = Project {
            id: "a".into(),
            parent_id: None,
            name: "Rezidence U Řeky".into(),
            image: None,
            image_width: None,
            image_height: None,
            public_key: None,
            localities: vec![],
            regions: vec![],
            frontend: None,
        };
        let mut b = a.clone();
        b.id = "b".into();

        let plan = plan_batch_sync(&store, &[&a, &b]);
        assert_eq!(plan.projects[0].public_key, "rezidence-u-reky-2");
        assert_eq!(plan.projects[1].public_key, "rezidence-u-reky-3");
        assert_eq!(plan.projects[0].sort_rank, 1);
        assert_eq!(plan.projects[1].sort_rank, 2);
    }
}

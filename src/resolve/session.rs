use super::ProjectGraph;
use crate::model::{Locality, Reference, Region, ResolvedLocality, StatusIndex};
use crate::text::fold;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

// Availability vocabulary, matched (folded) against both status label and
// status key. The payloads mix Czech and English status naming.
const AVAILABLE_TERMS: &[&str] = &[
    "volny",
    "volne",
    "volna",
    "dostupny",
    "dostupne",
    "k dispozici",
    "available",
    "free",
];
const RESERVED_TERMS: &[&str] = &["rezerv", "reserv"];
const SOLD_TERMS: &[&str] = &["prodan", "sold"];

/// One accumulated per-status line of a region summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub status_key: String,
    pub label: String,
    pub color: Option<String>,
    pub count: usize,
    pub is_available: bool,
    pub is_reserved: bool,
    pub is_sold: bool,
}

/// Aggregated occupancy of one region, computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub entries: Vec<SummaryEntry>,
    pub dominant: DominantState,
}

/// The single state a region renders as.
///
/// Selection order: available > reserved > sold > first entry by label >
/// preparing (empty summary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DominantState {
    Available,
    Reserved,
    Sold,
    Status(String),
    Preparing,
}

// A single status sighting before folding: either a locality's status or a
// status-bearing region standing in for one.
#[derive(Debug, Clone)]
struct StatusObservation {
    status_id: Option<String>,
    status_label: Option<String>,
    color: Option<String>,
}

impl StatusObservation {
    fn of_locality(locality: &Locality) -> Self {
        Self {
            status_id: locality.status_id.clone(),
            status_label: locality.status_label.clone(),
            color: None,
        }
    }

    fn of_region(region: &Region) -> Self {
        Self {
            status_id: region.status_id.clone(),
            status_label: region.status_label.clone(),
            color: region.status_color.clone(),
        }
    }
}

/// One resolution pass over an already-built [`ProjectGraph`].
///
/// Both operations are memoized per session and cycle-guarded with an
/// explicit visiting set: an id re-entered while on the current recursion
/// stack contributes nothing instead of raising an error. Caches are scoped
/// to this session object and must never be reused across two different
/// root payloads.
pub struct ResolveSession<'a> {
    graph: &'a ProjectGraph,
    statuses: &'a StatusIndex,
    locality_index: HashMap<String, ResolvedLocality>,
    locality_cache: HashMap<String, Vec<ResolvedLocality>>,
    region_entry_cache: HashMap<String, Vec<StatusObservation>>,
    visiting: HashSet<String>,
}

impl<'a> ResolveSession<'a> {
    #[must_use]
    pub fn new(graph: &'a ProjectGraph, statuses: &'a StatusIndex) -> Self {
        // Session-wide locality index, first seen wins (registration order).
        let mut locality_index = HashMap::new();
        for project in graph.projects() {
            for locality in &project.localities {
                locality_index
                    .entry(locality.id.clone())
                    .or_insert_with(|| ResolvedLocality {
                        owner_project_id: project.id.clone(),
                        owner_project_name: project.name.clone(),
                        locality: locality.clone(),
                    });
            }
        }

        Self {
            graph,
            statuses,
            locality_index,
            locality_cache: HashMap::new(),
            region_entry_cache: HashMap::new(),
            visiting: HashSet::new(),
        }
    }

    /// All localities reachable from the project: its own plus those of
    /// every descendant linked map, each tagged with its owning project.
    pub fn collect_localities(&mut self, project_id: &str) -> Vec<ResolvedLocality> {
        if let Some(cached) = self.locality_cache.get(project_id) {
            return cached.clone();
        }
        if self.visiting.contains(project_id) {
            // Cycle: no further contribution.
            return Vec::new();
        }
        let Some(project) = self.graph.get(project_id) else {
            return Vec::new();
        };

        let owner_id = project.id.clone();
        let owner_name = project.name.clone();
        let mut collected: Vec<ResolvedLocality> = project
            .localities
            .iter()
            .map(|locality| ResolvedLocality {
                owner_project_id: owner_id.clone(),
                owner_project_name: owner_name.clone(),
                locality: locality.clone(),
            })
            .collect();

        self.visiting.insert(project_id.to_string());
        for child_id in self.graph.child_map_ids(project_id) {
            collected.extend(self.collect_localities(&child_id));
        }
        self.visiting.remove(project_id);

        self.locality_cache
            .insert(project_id.to_string(), collected.clone());
        collected
    }

    /// Aggregate the statuses of everything a region's children reference.
    ///
    /// Location children resolve against the session-wide locality index;
    /// Map children fold the linked map's collected localities, falling back
    /// to its status-bearing regions when it exposes no structured units.
    /// Unresolvable references contribute nothing.
    pub fn summarize_region(&mut self, region: &Region) -> StatusSummary {
        let mut observations = Vec::new();

        for child in &region.children {
            let Some(reference) = Reference::parse(child) else {
                continue;
            };
            match reference {
                Reference::Location { id } => {
                    if let Some(resolved) = self.lookup_locality(&id) {
                        observations.push(StatusObservation::of_locality(&resolved.locality));
                    }
                }
                Reference::Map { id } => {
                    let localities = self.collect_localities(&id);
                    if localities.is_empty() {
                        observations.extend(self.region_derived_entries(&id));
                    } else {
                        observations.extend(
                            localities
                                .iter()
                                .map(|r| StatusObservation::of_locality(&r.locality)),
                        );
                    }
                }
            }
        }

        fold_observations(self.statuses, &observations)
    }

    // Lookup by exact id first, then the "location:"-prefixed key form some
    // legacy writers stored.
    fn lookup_locality(&self, id: &str) -> Option<&ResolvedLocality> {
        self.locality_index
            .get(id)
            .or_else(|| self.locality_index.get(&format!("location:{id}")))
    }

    // One pseudo-entry per status-bearing region of the linked map: a region
    // functions as a stand-in location when the map has no structured units.
    fn region_derived_entries(&mut self, project_id: &str) -> Vec<StatusObservation> {
        if let Some(cached) = self.region_entry_cache.get(project_id) {
            return cached.clone();
        }
        let entries: Vec<StatusObservation> = self.graph.get(project_id).map_or_else(Vec::new, |p| {
            p.regions
                .iter()
                .filter(|r| r.has_status())
                .map(StatusObservation::of_region)
                .collect()
        });
        self.region_entry_cache
            .insert(project_id.to_string(), entries.clone());
        entries
    }
}

fn fold_observations(statuses: &StatusIndex, observations: &[StatusObservation]) -> StatusSummary {
    let mut entries: Vec<SummaryEntry> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for obs in observations {
        let record = statuses.lookup(obs.status_id.as_deref(), obs.status_label.as_deref());

        let key = obs
            .status_id
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| record.map(|r| r.id.clone()))
            .or_else(|| obs.status_label.as_deref().map(fold));
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            // No status information at all; nothing to fold.
            continue;
        };

        let label = record
            .map(|r| r.label.clone())
            .filter(|l| !l.is_empty())
            .or_else(|| obs.status_label.clone())
            .unwrap_or_else(|| key.clone());
        let color = record.and_then(|r| r.color.clone()).or_else(|| obs.color.clone());

        if let Some(&i) = index_by_key.get(&key) {
            entries[i].count += 1;
            if entries[i].color.is_none() {
                entries[i].color = color;
            }
        } else {
            let folded_label = fold(&label);
            let folded_key = fold(&key);
            let is_available = record.and_then(|r| r.is_available_hint).unwrap_or_else(|| {
                contains_any(&folded_label, AVAILABLE_TERMS)
                    || contains_any(&folded_key, AVAILABLE_TERMS)
            });
            let is_reserved = contains_any(&folded_label, RESERVED_TERMS)
                || contains_any(&folded_key, RESERVED_TERMS);
            let is_sold =
                contains_any(&folded_label, SOLD_TERMS) || contains_any(&folded_key, SOLD_TERMS);

            index_by_key.insert(key.clone(), entries.len());
            entries.push(SummaryEntry {
                status_key: key,
                label,
                color,
                count: 1,
                is_available,
                is_reserved,
                is_sold,
            });
        }
    }

    let dominant = dominant_state(&entries);
    StatusSummary { entries, dominant }
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| haystack.contains(term))
}

fn dominant_state(entries: &[SummaryEntry]) -> DominantState {
    if entries.iter().any(|e| e.is_available) {
        return DominantState::Available;
    }
    if entries.iter().any(|e| e.is_reserved) {
        return DominantState::Reserved;
    }
    if entries.iter().any(|e| e.is_sold) {
        return DominantState::Sold;
    }
    entries
        .iter()
        .min_by(|a, b| fold(&a.label).cmp(&fold(&b.label)))
        .map_or(DominantState::Preparing, |e| {
            DominantState::Status(e.label.clone())
        })
}

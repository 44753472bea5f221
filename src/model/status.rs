use crate::text::fold;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A labeled, colored state attached to a locality or directly to a region.
/// Global to one rendering session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Explicit availability flag; when absent, classification falls back to
    /// the keyword vocabulary.
    #[serde(default, alias = "isAvailable", alias = "available")]
    pub is_available_hint: Option<bool>,
}

/// Session-wide status table, keyed by id with label fallback lookup.
#[derive(Debug, Default)]
pub struct StatusIndex {
    statuses: Vec<Status>,
    by_id: HashMap<String, usize>,
    by_label: HashMap<String, usize>,
}

impl StatusIndex {
    #[must_use]
    pub fn new(statuses: Vec<Status>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_label = HashMap::new();
        for (i, status) in statuses.iter().enumerate() {
            by_id.entry(status.id.clone()).or_insert(i);
            if !status.label.is_empty() {
                by_label.entry(fold(&status.label)).or_insert(i);
            }
        }
        Self {
            statuses,
            by_id,
            by_label,
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Status> {
        self.by_id.get(id).map(|&i| &self.statuses[i])
    }

    /// Resolve a status record by id, falling back to a case/diacritic
    /// insensitive label match when the id is unknown.
    #[must_use]
    pub fn lookup(&self, id: Option<&str>, label: Option<&str>) -> Option<&Status> {
        if let Some(found) = id.and_then(|id| self.get(id)) {
            return Some(found);
        }
        label
            .and_then(|l| self.by_label.get(&fold(l)))
            .map(|&i| &self.statuses[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index() -> StatusIndex {
        StatusIndex::new(vec![
            Status {
                id: "available".into(),
                label: "Volné".into(),
                color: Some("#829a68".into()),
                is_available_hint: Some(true),
            },
            Status {
                id: "sold".into(),
                label: "Prodáno".into(),
                color: None,
                is_available_hint: Some(false),
            },
        ])
    }

    #[test]
    fn lookup_prefers_id_over_label() {
        let idx = index();
        assert_eq!(idx.lookup(Some("sold"), Some("Volné")).unwrap().id, "sold");
    }

    #[test]
    fn lookup_falls_back_to_folded_label() {
        let idx = index();
        assert_eq!(idx.lookup(Some("nope"), Some("VOLNE")).unwrap().id, "available");
        assert_eq!(idx.lookup(None, Some("prodano")).unwrap().id, "sold");
    }
}

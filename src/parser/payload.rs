use crate::error::PayloadError;
use crate::model::{Project, Status};
use serde::Deserialize;
use std::path::Path;

/// Response envelope the backend hands to the viewer: the current project
/// plus every project object reachable from it (breadcrumb ancestors, linked
/// maps referenced by regions, and the flattened descendant set), the status
/// table and the accent color. The engine never fetches anything on its own;
/// this batch is all it will ever see for one resolution session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub project: Project,
    #[serde(default)]
    pub ancestors: Vec<Project>,
    #[serde(default)]
    pub linked_projects: Vec<Project>,
    #[serde(default)]
    pub hierarchy_projects: Vec<Project>,
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(default)]
    pub frontend_accent_color: Option<String>,
}

impl Envelope {
    /// Parse an envelope from JSON. A bare project object (the viewer
    /// sometimes receives the project alone) is accepted as a degenerate
    /// envelope with empty accompanying lists.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        if let Ok(envelope) = serde_json::from_str::<Self>(json) {
            return Ok(envelope);
        }
        let project = serde_json::from_str::<Project>(json)?;
        Ok(Self {
            project,
            ancestors: Vec::new(),
            linked_projects: Vec::new(),
            hierarchy_projects: Vec::new(),
            statuses: Vec::new(),
            frontend_accent_color: None,
        })
    }
}

/// Loads a project payload file and parses it into an [`Envelope`].
///
/// # Errors
///
/// Returns [`PayloadError::FileRead`] if the file cannot be read.
/// Returns [`PayloadError::InvalidJson`] if neither the envelope nor the
/// bare-project shape parses.
///
/// # Example
///
/// ```no_run
/// use estate_maps::parser::load_envelope;
///
/// let envelope = load_envelope("project.json")?;
/// println!("Project: {}", envelope.project.name);
/// # Ok::<(), estate_maps::error::PayloadError>(())
/// ```
pub fn load_envelope<P: AsRef<Path>>(path: P) -> Result<Envelope, PayloadError> {
    let content = std::fs::read_to_string(&path).map_err(|source| PayloadError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    Envelope::from_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_ENVELOPE: &str = r##"{
        "project": {
            "id": "pk_root",
            "name": "Rezidence Zelené Údolí",
            "mapImage": "https://cdn.example/plan.png",
            "imageWidth": 800,
            "imageHeight": 600,
            "floors": [
                {"id": "floor-1", "name": "Byt 1", "type": "byt", "statusId": "available",
                 "area": "54,3", "price": 4500000, "detailUrl": "/byt-1"}
            ],
            "regions": [
                {"id": "r1",
                 "geometry": {"points": [[0, 0], [800, 0], [800, 600]]},
                 "children": ["floor-1", "map:pk_garage", {"type": "map", "id": "pk_cellar"}],
                 "statusLabel": "Volné"}
            ],
            "frontend": {"locationTable": {"enabled": true, "scope": "hierarchy", "tableonly": false}}
        },
        "ancestors": [],
        "linkedProjects": [{"id": "pk_garage", "name": "Garáže", "floors": [], "regions": []}],
        "hierarchyProjects": [],
        "statuses": [{"id": "available", "label": "Volné", "color": "#829a68", "isAvailable": true}],
        "frontendAccentColor": "#9e683c"
    }"##;

    #[test]
    fn parses_full_envelope() {
        let envelope = Envelope::from_json(FULL_ENVELOPE).unwrap();
        assert_eq!(envelope.project.id, "pk_root");
        assert_eq!(envelope.project.localities.len(), 1);
        assert_eq!(envelope.project.localities[0].area.as_deref(), Some("54,3"));
        assert_eq!(envelope.project.localities[0].price.as_deref(), Some("4500000"));
        assert_eq!(envelope.project.regions[0].children.len(), 3);
        assert_eq!(envelope.linked_projects[0].name, "Garáže");
        assert_eq!(envelope.statuses[0].is_available_hint, Some(true));
        assert_eq!(envelope.frontend_accent_color.as_deref(), Some("#9e683c"));
        assert_eq!(
            envelope.project.table_scope(),
            crate::model::HierarchyScope::Hierarchy
        );
    }

    #[test]
    fn accepts_a_bare_project_object() {
        let envelope =
            Envelope::from_json(r#"{"id": "pk_solo", "name": "Solo", "floors": [], "regions": []}"#)
                .unwrap();
        assert_eq!(envelope.project.id, "pk_solo");
        assert!(envelope.linked_projects.is_empty());
    }

    #[test]
    fn rejects_json_without_a_project() {
        assert!(Envelope::from_json(r#"{"foo": 1}"#).is_err());
    }
}

pub mod graph;
pub mod hierarchy;
pub mod session;

pub use graph::ProjectGraph;
pub use hierarchy::{order_projects, RankedProject};
pub use session::{DominantState, ResolveSession, StatusSummary, SummaryEntry};

use crate::geometry::{self, Point};
use crate::model::{HierarchyScope, ResolvedLocality, StatusIndex};
use crate::parser::Envelope;
use serde::Serialize;

/// A region with its geometry resolved to normalized space and its status
/// summary computed. Empty `points` means the polygon is non-renderable;
/// the region still shows up in summaries and tables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRegion {
    pub id: String,
    pub points: Vec<Point>,
    pub summary: StatusSummary,
}

/// Everything one resolution pass produces for the viewer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProject {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub accent_color: Option<String>,
    pub scope: HierarchyScope,
    pub regions: Vec<ResolvedRegion>,
    pub localities: Vec<ResolvedLocality>,
    pub hierarchy: Vec<RankedProject>,
}

/// Run one full resolution pass over an envelope.
///
/// Builds the project graph, normalizes region geometry, computes per-region
/// summaries, collects the locality set for the requested scope and orders
/// the project batch. Best-effort throughout: malformed geometry only skips
/// that region, unknown references contribute nothing.
#[must_use]
pub fn resolve_envelope(envelope: &Envelope, scope: HierarchyScope) -> ResolvedProject {
    let graph = ProjectGraph::from_envelope(envelope);
    let statuses = StatusIndex::new(envelope.statuses.clone());
    let mut session = ResolveSession::new(&graph, &statuses);

    let root = &envelope.project;
    let image_size = root.image_size();

    let regions = root
        .regions
        .iter()
        .map(|region| ResolvedRegion {
            id: region.id.clone(),
            points: region
                .geometry
                .as_ref()
                .and_then(|raw| geometry::normalize(raw, image_size))
                .unwrap_or_default(),
            summary: session.summarize_region(region),
        })
        .collect();

    let localities = match scope {
        HierarchyScope::Current => root
            .localities
            .iter()
            .map(|locality| ResolvedLocality {
                owner_project_id: root.id.clone(),
                owner_project_name: root.name.clone(),
                locality: locality.clone(),
            })
            .collect(),
        HierarchyScope::Hierarchy => session.collect_localities(&root.id),
    };

    let batch: Vec<&crate::model::Project> = graph.projects().collect();
    let hierarchy = order_projects(&batch);

    ResolvedProject {
        id: root.id.clone(),
        name: root.name.clone(),
        image: root.image.clone(),
        accent_color: envelope.frontend_accent_color.clone(),
        scope,
        regions,
        localities,
        hierarchy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Envelope;
    use pretty_assertions::assert_eq;

    // Two projects each referencing the other through Map children: the
    // hierarchy only follows parent links, so both stand as independent
    // roots, and resolution terminates with each locality set counted once.
    #[test]
    fn map_cycles_do_not_affect_parent_hierarchy() {
        let envelope = Envelope::from_json(
            r#"{
                "project": {
                    "id": "alfa", "name": "Alfa",
                    "floors": [{"id": "a-1", "name": "A1", "statusId": "sold"}],
                    "regions": [{"id": "ra", "children": ["map:beta"]}]
                },
                "linkedProjects": [{
                    "id": "beta", "name": "Beta",
                    "floors": [{"id": "b-1", "name": "B1", "statusId": "sold"}],
                    "regions": [{"id": "rb", "children": ["map:alfa"]}]
                }]
            }"#,
        )
        .unwrap();

        let resolved = resolve_envelope(&envelope, HierarchyScope::Hierarchy);

        let ranked: Vec<(&str, usize)> = resolved
            .hierarchy
            .iter()
            .map(|r| (r.id.as_str(), r.depth))
            .collect();
        assert_eq!(ranked, vec![("alfa", 0), ("beta", 0)]);

        let ids: Vec<&str> = resolved
            .localities
            .iter()
            .map(|r| r.locality.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a-1", "b-1"]);
    }

    #[test]
    fn malformed_geometry_skips_only_that_region() {
        let envelope = Envelope::from_json(
            r#"{
                "project": {
                    "id": "p", "name": "P",
                    "imageWidth": 400, "imageHeight": 400,
                    "floors": [],
                    "regions": [
                        {"id": "bad", "geometry": "M 1 2", "children": []},
                        {"id": "good",
                         "geometry": "M 100 100 L 300 100 L 300 300 L 100 300 Z",
                         "children": []}
                    ]
                }
            }"#,
        )
        .unwrap();

        let resolved = resolve_envelope(&envelope, HierarchyScope::Current);
        assert_eq!(resolved.regions.len(), 2);
        assert!(resolved.regions[0].points.is_empty());
        assert_eq!(resolved.regions[1].points.len(), 4);
        assert_eq!(resolved.regions[1].points[0], crate::geometry::Point { x: 0.25, y: 0.25 });
    }
}

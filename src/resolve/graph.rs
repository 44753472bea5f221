use crate::model::{Project, Reference};
use crate::parser::Envelope;
use std::collections::HashMap;

/// In-memory index of every project known to one resolution session, keyed
/// by stable id.
///
/// The graph is built once per session from the root project plus every
/// project object the backend supplied alongside it; it performs no fetches.
/// Ids referenced but absent simply resolve to empty results.
#[derive(Debug, Default)]
pub struct ProjectGraph {
    projects: HashMap<String, Project>,
    order: Vec<String>,
}

impl ProjectGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every project of the envelope, in payload traversal order:
    /// root first, then linked maps, descendants and ancestors.
    #[must_use]
    pub fn from_envelope(envelope: &Envelope) -> Self {
        let mut graph = Self::new();
        graph.register(envelope.project.clone());
        for project in &envelope.linked_projects {
            graph.register(project.clone());
        }
        for project in &envelope.hierarchy_projects {
            graph.register(project.clone());
        }
        for project in &envelope.ancestors {
            graph.register(project.clone());
        }
        graph
    }

    /// Index a project by id. First registration wins: a later project with
    /// the same id is a no-op, reflecting first-seen semantics of payload
    /// traversal order.
    pub fn register(&mut self, project: Project) {
        if self.projects.contains_key(&project.id) {
            return;
        }
        self.order.push(project.id.clone());
        self.projects.insert(project.id.clone(), project);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.projects.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Projects in registration order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.order.iter().filter_map(|id| self.projects.get(id))
    }

    /// Ids referenced via Map-kind children across all of the project's
    /// regions, deduplicated in first-seen order.
    #[must_use]
    pub fn child_map_ids(&self, project_id: &str) -> Vec<String> {
        let Some(project) = self.get(project_id) else {
            return Vec::new();
        };

        let mut ids = Vec::new();
        for region in &project.regions {
            for child in &region.children {
                if let Some(reference) = Reference::parse(child) {
                    if reference.is_map() && !ids.iter().any(|id| id == reference.id()) {
                        ids.push(reference.id().to_string());
                    }
                }
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Region;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn project(id: &str, name: &str, children: Vec<serde_json::Value>) -> Project {
        Project {
            id: id.into(),
            parent_id: None,
            name: name.into(),
            image: None,
            image_width: None,
            image_height: None,
            public_key: None,
            localities: Vec::new(),
            regions: vec![Region {
                id: format!("{id}-r1"),
                geometry: None,
                children,
                status_id: None,
                status_label: None,
                status_color: None,
            }],
            frontend: None,
        }
    }

    #[test]
    fn first_registration_wins() {
        let mut graph = ProjectGraph::new();
        graph.register(project("a", "First", vec![]));
        graph.register(project("a", "Second", vec![]));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("a").unwrap().name, "First");
    }

    #[test]
    fn child_map_ids_collects_map_kind_children_only() {
        let mut graph = ProjectGraph::new();
        graph.register(project(
            "a",
            "A",
            vec![
                json!("floor-1"),
                json!("map:b"),
                json!({"type": "map", "id": "c"}),
                json!("map:b"),
            ],
        ));
        assert_eq!(graph.child_map_ids("a"), vec!["b".to_string(), "c".to_string()]);
        assert_eq!(graph.child_map_ids("missing"), Vec::<String>::new());
    }
}

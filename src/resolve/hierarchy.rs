use crate::model::Project;
use crate::text::{fold, natural_cmp};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// One project in the final display order. `rank` is the dense 1-based sort
/// key the backend persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProject {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub rank: usize,
    pub depth: usize,
}

/// Deterministic display order of a project batch.
///
/// Pre-order depth-first walk: roots (parent absent or outside the batch)
/// sorted by diacritic-stripped, case-folded name with numeric-aware
/// comparison, then by id; each node's children sorted the same way; parent
/// enqueued before its children. Nodes unreachable from any root (dangling
/// parent cycles) are appended at the end in the same sort order, each
/// walked independently. Every node is emitted exactly once.
#[must_use]
pub fn order_projects(projects: &[&Project]) -> Vec<RankedProject> {
    let batch_ids: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();

    let mut children: HashMap<&str, Vec<&Project>> = HashMap::new();
    let mut roots: Vec<&Project> = Vec::new();
    for &project in projects {
        match project.parent_id.as_deref().filter(|p| batch_ids.contains(p)) {
            Some(parent) => children.entry(parent).or_default().push(project),
            None => roots.push(project),
        }
    }
    roots.sort_by(|a, b| display_cmp(a, b));
    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| display_cmp(a, b));
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut ordered: Vec<RankedProject> = Vec::new();
    for &root in &roots {
        walk(root, 0, &children, &mut visited, &mut ordered);
    }

    // Leftovers: orphaned by a cycle among parent links. Same sort order,
    // each walked independently.
    let mut leftovers: Vec<&Project> = projects
        .iter()
        .filter(|p| !visited.contains(p.id.as_str()))
        .copied()
        .collect();
    leftovers.sort_by(|a, b| display_cmp(a, b));
    for project in leftovers {
        walk(project, 0, &children, &mut visited, &mut ordered);
    }

    for (i, entry) in ordered.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    ordered
}

fn walk<'p>(
    project: &'p Project,
    depth: usize,
    children: &HashMap<&str, Vec<&'p Project>>,
    visited: &mut HashSet<&'p str>,
    ordered: &mut Vec<RankedProject>,
) {
    if !visited.insert(project.id.as_str()) {
        return;
    }
    ordered.push(RankedProject {
        id: project.id.clone(),
        name: project.name.clone(),
        parent_id: project.parent_id.clone(),
        rank: 0,
        depth,
    });
    if let Some(direct) = children.get(project.id.as_str()) {
        for &child in direct {
            walk(child, depth + 1, children, visited, ordered);
        }
    }
}

fn display_cmp(a: &Project, b: &Project) -> Ordering {
    natural_cmp(&fold(&a.name), &fold(&b.name)).then_with(|| natural_cmp(&a.id, &b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project(id: &str, name: &str, parent: Option<&str>) -> Project {
        Project {
            id: id.into(),
            parent_id: parent.map(String::from),
            name: name.into(),
            image: None,
            image_width: None,
            image_height: None,
            public_key: None,
            localities: Vec::new(),
            regions: Vec::new(),
            frontend: None,
        }
    }

    fn ids(ordered: &[RankedProject]) -> Vec<&str> {
        ordered.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn parents_come_before_children_with_natural_sibling_order() {
        let projects = vec![
            project("c", "Dům 10", Some("root")),
            project("b", "Dům 2", Some("root")),
            project("root", "Areál", None),
            project("d", "Ateliér", None),
        ];
        let refs: Vec<&Project> = projects.iter().collect();
        let ordered = order_projects(&refs);

        // "Areál" folds to "areal" and sorts before "Ateliér"/"atelier";
        // numeric-aware comparison puts "Dům 2" before "Dům 10".
        assert_eq!(ids(&ordered), vec!["root", "b", "c", "d"]);
        assert_eq!(ordered.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(ordered[1].depth, 1);
    }

    #[test]
    fn foreign_parent_makes_a_root() {
        let projects = vec![project("a", "Solo", Some("not-in-batch"))];
        let refs: Vec<&Project> = projects.iter().collect();
        let ordered = order_projects(&refs);
        assert_eq!(ids(&ordered), vec!["a"]);
        assert_eq!(ordered[0].depth, 0);
    }

    #[test]
    fn parent_cycles_are_appended_and_emitted_once() {
        let projects = vec![
            project("x", "Okruh B", Some("y")),
            project("y", "Okruh A", Some("x")),
            project("r", "Kořen", None),
        ];
        let refs: Vec<&Project> = projects.iter().collect();
        let ordered = order_projects(&refs);

        // The cycle pair is unreachable from the root; it lands at the end in
        // name order, walked from "Okruh A" which pulls in its child.
        assert_eq!(ids(&ordered), vec!["r", "y", "x"]);
        assert_eq!(ordered.len(), 3);
    }

    #[test]
    fn every_node_appears_exactly_once() {
        let projects = vec![
            project("a", "A", None),
            project("b", "B", Some("a")),
            project("c", "C", Some("b")),
            project("d", "D", Some("ghost")),
        ];
        let refs: Vec<&Project> = projects.iter().collect();
        let ordered = order_projects(&refs);

        let mut seen = ids(&ordered);
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c", "d"]);

        // Parent-before-child for every edge inside the batch.
        for entry in &ordered {
            if let Some(parent) = &entry.parent_id {
                if let Some(parent_rank) = ordered.iter().find(|r| &r.id == parent).map(|r| r.rank) {
                    assert!(parent_rank < entry.rank, "{parent} must precede {}", entry.id);
                }
            }
        }
    }
}

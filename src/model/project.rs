use super::Locality;
use crate::geometry::{ImageSize, RawGeometry};
use serde::{Deserialize, Serialize};

/// A building or site with a floor-plan image and a set of drawable regions.
///
/// The id is a stable external identifier, not a raw database key. A project
/// may be its own root (`parent_id` absent); the parent graph is expected to
/// be acyclic, but nothing here relies on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    /// Floor-plan image URL.
    #[serde(default, alias = "mapImage")]
    pub image: Option<String>,
    /// Pixel dimensions of the floor-plan image, when the backend knows them.
    #[serde(default)]
    pub image_width: Option<f64>,
    #[serde(default)]
    pub image_height: Option<f64>,
    /// Externally addressable slug (write direction).
    #[serde(default, alias = "map_key")]
    pub public_key: Option<String>,
    #[serde(default, rename = "floors")]
    pub localities: Vec<Locality>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub frontend: Option<FrontendConfig>,
}

/// A drawable polygon over the floor-plan image.
///
/// `children` stays in wire form (strings or objects in several legacy
/// shapes); [`super::Reference::parse`] classifies each entry on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub children: Vec<serde_json::Value>,
    #[serde(default)]
    pub status_id: Option<String>,
    #[serde(default)]
    pub status_label: Option<String>,
    #[serde(default)]
    pub status_color: Option<String>,
}

impl Region {
    /// Whether the region carries direct status information. Such a region
    /// can stand in for a location when its map exposes no structured units.
    #[must_use]
    pub fn has_status(&self) -> bool {
        self.status_id.as_deref().is_some_and(|s| !s.is_empty())
            || self.status_label.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Per-project frontend configuration passed through from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendConfig {
    #[serde(default)]
    pub location_table: Option<TableConfig>,
}

/// Location-table settings for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub scope: HierarchyScope,
    #[serde(default)]
    pub tableonly: bool,
}

/// Whether table and summary views consider only the current project's
/// direct localities or the full transitive set through linked maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyScope {
    #[default]
    Current,
    Hierarchy,
}

impl Project {
    /// Image size usable for pixel-space normalization, if the backend
    /// supplied positive dimensions.
    #[must_use]
    pub fn image_size(&self) -> Option<ImageSize> {
        match (self.image_width, self.image_height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(ImageSize::new(w, h)),
            _ => None,
        }
    }

    /// Scope the location table was configured with, defaulting to current.
    #[must_use]
    pub fn table_scope(&self) -> HierarchyScope {
        self.frontend
            .as_ref()
            .and_then(|f| f.location_table.as_ref())
            .map_or(HierarchyScope::default(), |t| t.scope)
    }

    #[must_use]
    pub fn total_localities(&self) -> usize {
        self.localities.len()
    }

    #[must_use]
    pub fn total_regions(&self) -> usize {
        self.regions.len()
    }
}

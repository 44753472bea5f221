use serde::Serialize;
use serde_json::Value;

/// A region child, decoded from its heterogeneous wire shape into either a
/// concrete sellable unit or a link to another entire map.
///
/// The wire sends strings (`"floor-12"`, `"map:pk_abc"`, legacy
/// `"project-7"`) or objects (`{"type": "map", "id": ...}` and several
/// field-name variants). Parsing is total and pure: unparsable input yields
/// `None` and the entry is dropped, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reference {
    Location { id: String },
    Map { id: String },
}

impl Reference {
    /// Decode one region-child entry.
    #[must_use]
    pub fn parse(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(s) => Self::parse_str(s),
            Value::Object(fields) => {
                let kind = fields
                    .get("type")
                    .or_else(|| fields.get("kind"))
                    .and_then(Value::as_str)
                    .unwrap_or("");

                // Legacy writers used several names for the id field.
                let id = ["id", "target", "value", "uuid"]
                    .iter()
                    .find_map(|key| scalar_id(fields.get(*key)?))?;
                if id.is_empty() {
                    return None;
                }

                if kind.eq_ignore_ascii_case("map") || kind.eq_ignore_ascii_case("project") {
                    Some(Self::Map { id })
                } else {
                    Some(Self::Location { id })
                }
            }
            _ => None,
        }
    }

    fn parse_str(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some((prefix, rest)) = trimmed.split_once(':') {
            let rest = rest.trim();
            if rest.is_empty() {
                return None;
            }
            if prefix.eq_ignore_ascii_case("map") || prefix.eq_ignore_ascii_case("project") {
                return Some(Self::Map { id: rest.to_string() });
            }
            if prefix.eq_ignore_ascii_case("location") {
                return Some(Self::Location { id: rest.to_string() });
            }
        }

        // Legacy shape: "project-<digits>" linked a whole map. The full
        // string stays as the id, graph keys are stored in that form.
        if is_legacy_project_id(trimmed) {
            return Some(Self::Map {
                id: trimmed.to_string(),
            });
        }

        Some(Self::Location {
            id: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Location { id } | Self::Map { id } => id,
        }
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map { .. })
    }

    /// Canonical string form: `map:<id>` / `location:<id>`. Parsing the
    /// canonical form yields the reference back unchanged.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Location { id } => format!("location:{id}"),
            Self::Map { id } => format!("map:{id}"),
        }
    }
}

fn is_legacy_project_id(s: &str) -> bool {
    s.strip_prefix("project-")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

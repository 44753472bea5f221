use serde::{Deserialize, Deserializer, Serialize};

/// A sellable or rentable unit (apartment, garage slot, ...) with a status.
///
/// Belongs to exactly one project, but may surface in an ancestor region's
/// summary when reached transitively through a linked map. Numeric-looking
/// fields (area, price, rent) are kept verbatim as text: legacy rows mix
/// separator conventions and free-form values ("na vyžádání"), and the
/// tolerant parse happens at projection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub unit_type: String,
    #[serde(default)]
    pub status_id: Option<String>,
    #[serde(default)]
    pub status_label: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub rent: Option<String>,
    #[serde(default)]
    pub detail_url: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
}

/// A locality as surfaced by graph resolution, tagged with the project that
/// actually owns it (which may be a descendant of the map being rendered).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocality {
    pub owner_project_id: String,
    pub owner_project_name: String,
    #[serde(flatten)]
    pub locality: Locality,
}

// Legacy payloads send price/area either as a JSON number or as a formatted
// string; both land as the raw string, anything else is dropped.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn price_accepts_string_and_number() {
        let from_string: Locality =
            serde_json::from_str(r#"{"id": "l1", "price": "4 500 000 Kč"}"#).unwrap();
        assert_eq!(from_string.price.as_deref(), Some("4 500 000 Kč"));

        let from_number: Locality = serde_json::from_str(r#"{"id": "l2", "price": 4500000}"#).unwrap();
        assert_eq!(from_number.price.as_deref(), Some("4500000"));

        let from_null: Locality = serde_json::from_str(r#"{"id": "l3", "price": null}"#).unwrap();
        assert_eq!(from_null.price, None);
    }

    #[test]
    fn type_field_maps_to_unit_type() {
        let locality: Locality =
            serde_json::from_str(r#"{"id": "l1", "type": "byt", "name": "Byt 12"}"#).unwrap();
        assert_eq!(locality.unit_type, "byt");
    }
}

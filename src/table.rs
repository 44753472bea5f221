//! Filterable, sortable row sets over resolved localities, independent of
//! any rendering layer.

use crate::model::ResolvedLocality;
use crate::text::{fold, fold_contains, natural_cmp, parse_flexible_number};
use serde::Serialize;
use std::cmp::Ordering;

// Primary unit types sort ahead of everything else in the baseline order.
const PRIMARY_TYPES: &[&str] = &["byt", "apartment"];
// Rows with a cancelled status sink to the end of the baseline order.
const CANCELLED_TERMS: &[&str] = &["zrus", "stornov", "cancel"];

/// Filter state the table UI drives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub price_order: Option<PriceOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    Ascending,
    Descending,
}

/// One row of the locality table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub locality_id: String,
    pub owner_project_id: String,
    pub owner_project_name: String,
    pub name: String,
    pub unit_type: String,
    pub designation: Option<String>,
    pub status_id: Option<String>,
    pub status_label: Option<String>,
    pub area: Option<String>,
    pub price: Option<String>,
    /// Tolerant numeric parse of `price`; `None` sorts last in either
    /// direction and renders as a placeholder.
    pub price_value: Option<f64>,
    pub rent: Option<String>,
    pub detail_url: Option<String>,
}

/// Project the resolved locality set into filtered, ordered table rows.
#[must_use]
pub fn project_rows(localities: &[ResolvedLocality], filter: &TableFilter) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = localities.iter().map(to_row).collect();

    // Baseline order: primary unit types first, then folded-name alphabet,
    // cancelled rows pushed to the end. This stays the secondary key under
    // the price sort.
    rows.sort_by(baseline_cmp);

    if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
        rows.retain(|row| row_matches(row, term));
    }
    if let Some(status) = filter.status.as_deref() {
        rows.retain(|row| row.status_id.as_deref() == Some(status));
    }
    if let Some(order) = filter.price_order {
        rows.sort_by(|a, b| price_cmp(a, b, order));
    }

    rows
}

fn to_row(resolved: &ResolvedLocality) -> TableRow {
    let locality = &resolved.locality;
    TableRow {
        locality_id: locality.id.clone(),
        owner_project_id: resolved.owner_project_id.clone(),
        owner_project_name: resolved.owner_project_name.clone(),
        name: locality.name.clone(),
        unit_type: locality.unit_type.clone(),
        designation: locality.designation.clone(),
        status_id: locality.status_id.clone(),
        status_label: locality.status_label.clone(),
        area: locality.area.clone(),
        price: locality.price.clone(),
        price_value: locality.price.as_deref().and_then(parse_flexible_number),
        rent: locality.rent.clone(),
        detail_url: locality.detail_url.clone(),
    }
}

fn row_matches(row: &TableRow, term: &str) -> bool {
    fold_contains(&row.name, term)
        || row
            .status_label
            .as_deref()
            .is_some_and(|label| fold_contains(label, term))
        || row
            .designation
            .as_deref()
            .is_some_and(|designation| fold_contains(designation, term))
        || fold_contains(&row.unit_type, term)
}

fn baseline_cmp(a: &TableRow, b: &TableRow) -> Ordering {
    is_cancelled(a)
        .cmp(&is_cancelled(b))
        .then_with(|| is_primary(b).cmp(&is_primary(a)))
        .then_with(|| natural_cmp(&fold(&a.name), &fold(&b.name)))
        .then_with(|| natural_cmp(&a.locality_id, &b.locality_id))
}

fn is_primary(row: &TableRow) -> bool {
    let folded = fold(&row.unit_type);
    PRIMARY_TYPES.iter().any(|t| folded == *t)
}

fn is_cancelled(row: &TableRow) -> bool {
    let folded = row
        .status_label
        .as_deref()
        .or(row.status_id.as_deref())
        .map(fold)
        .unwrap_or_default();
    CANCELLED_TERMS.iter().any(|term| folded.contains(term))
}

// Unparsable prices sort last regardless of direction; equal or absent
// prices keep their prior relative order (the sort is stable).
fn price_cmp(a: &TableRow, b: &TableRow, order: PriceOrder) -> Ordering {
    match (a.price_value, b.price_value) {
        (Some(pa), Some(pb)) => {
            let ord = pa.partial_cmp(&pb).unwrap_or(Ordering::Equal);
            match order {
                PriceOrder::Ascending => ord,
                PriceOrder::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Locality;
    use pretty_assertions::assert_eq;

    fn resolved(id: &str, name: &str, unit_type: &str, status: Option<&str>, price: Option<&str>) -> ResolvedLocality {
        ResolvedLocality {
            owner_project_id: "p".into(),
            owner_project_name: "P".into(),
            locality: Locality {
                id: id.into(),
                name: name.into(),
                unit_type: unit_type.into(),
                status_id: status.map(String::from),
                status_label: None,
                area: None,
                price: price.map(String::from),
                rent: None,
                detail_url: None,
                designation: None,
            },
        }
    }

    fn names(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn baseline_puts_primary_types_first_and_cancelled_last() {
        let localities = vec![
            resolved("1", "Garáž 1", "garaz", Some("available"), None),
            resolved("2", "Byt 10", "byt", Some("available"), None),
            resolved("3", "Byt 2", "byt", Some("zrušeno"), None),
            resolved("4", "Byt 1", "byt", Some("available"), None),
        ];
        let rows = project_rows(&localities, &TableFilter::default());
        assert_eq!(names(&rows), vec!["Byt 1", "Byt 10", "Garáž 1", "Byt 2"]);
    }

    #[test]
    fn search_is_diacritic_and_case_insensitive() {
        let localities = vec![
            resolved("1", "Garáž 1", "garaz", None, None),
            resolved("2", "Byt 1", "byt", None, None),
        ];
        let filter = TableFilter {
            search: Some("GARAZ".into()),
            ..TableFilter::default()
        };
        assert_eq!(names(&project_rows(&localities, &filter)), vec!["Garáž 1"]);
    }

    #[test]
    fn status_filter_is_exact_on_resolved_id() {
        let localities = vec![
            resolved("1", "Byt 1", "byt", Some("available"), None),
            resolved("2", "Byt 2", "byt", Some("sold"), None),
        ];
        let filter = TableFilter {
            status: Some("sold".into()),
            ..TableFilter::default()
        };
        assert_eq!(names(&project_rows(&localities, &filter)), vec!["Byt 2"]);
    }

    #[test]
    fn invalid_prices_sort_last_in_both_directions() {
        let localities = vec![
            resolved("1", "Byt 1", "byt", None, Some("3 200 000 Kč")),
            resolved("2", "Byt 2", "byt", None, Some("na vyžádání")),
            resolved("3", "Byt 3", "byt", None, Some("2 900 000 Kč")),
        ];

        let ascending = TableFilter {
            price_order: Some(PriceOrder::Ascending),
            ..TableFilter::default()
        };
        assert_eq!(
            names(&project_rows(&localities, &ascending)),
            vec!["Byt 3", "Byt 1", "Byt 2"]
        );

        let descending = TableFilter {
            price_order: Some(PriceOrder::Descending),
            ..TableFilter::default()
        };
        assert_eq!(
            names(&project_rows(&localities, &descending)),
            vec!["Byt 1", "Byt 3", "Byt 2"]
        );
    }

    #[test]
    fn equal_prices_keep_baseline_order() {
        let localities = vec![
            resolved("1", "Byt 2", "byt", None, Some("100")),
            resolved("2", "Byt 1", "byt", None, Some("100")),
        ];
        let filter = TableFilter {
            price_order: Some(PriceOrder::Ascending),
            ..TableFilter::default()
        };
        // Baseline (name) order survives the stable price sort.
        assert_eq!(names(&project_rows(&localities, &filter)), vec!["Byt 1", "Byt 2"]);
    }
}

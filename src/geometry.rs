//! Region geometry normalization.
//!
//! Raw region geometry arrives in three encodings: a pixel-space path-like
//! string, a JSON point array, or an already-normalized array. All of them
//! resolve to one canonical ordered sequence of `(x, y)` pairs in [0,1]
//! image-relative space, or to nothing when fewer than 3 usable points
//! remain (the region is then non-renderable but still visible elsewhere,
//! e.g. in the table).

use serde::{Deserialize, Serialize};

/// Coordinates above this magnitude flag the whole input as pixel-space.
/// The decision is global across the point set, never per coordinate.
const PIXEL_SPACE_THRESHOLD: f64 = 1.5;

/// Wire shapes a region geometry can arrive in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGeometry {
    /// `{ "points": [[x, y], ...] }`
    PointsObject { points: Vec<(f64, f64)> },
    /// Bare point array, possibly already normalized.
    Points(Vec<(f64, f64)>),
    /// Path-like string containing numeric tokens (`"M 100 100 L 300 100 Z"`).
    Path(String),
}

/// One normalized polygon vertex in [0,1]² image-relative space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Pixel dimensions of the floor-plan image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_usable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Normalize raw geometry into [0,1]² polygon vertices.
///
/// Returns `None` when fewer than 3 valid points result; callers must treat
/// the region as non-renderable and keep the rest of the project intact.
/// When the image size is unknown, pixel-space input is clamped only.
/// The operation is idempotent: normalizing its own output changes nothing.
#[must_use]
pub fn normalize(raw: &RawGeometry, image: Option<ImageSize>) -> Option<Vec<Point>> {
    let pairs: Vec<(f64, f64)> = match raw {
        RawGeometry::PointsObject { points } | RawGeometry::Points(points) => points.clone(),
        RawGeometry::Path(path) => pair_up(&scan_numbers(path)),
    };
    normalize_pairs(&pairs, image)
}

fn normalize_pairs(pairs: &[(f64, f64)], image: Option<ImageSize>) -> Option<Vec<Point>> {
    let valid: Vec<(f64, f64)> = pairs
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if valid.len() < 3 {
        return None;
    }

    // One global decision for the whole set: any component beyond the
    // threshold means pixel space.
    let max_magnitude = valid
        .iter()
        .flat_map(|&(x, y)| [x.abs(), y.abs()])
        .fold(0.0_f64, f64::max);
    let divisor = (max_magnitude > PIXEL_SPACE_THRESHOLD)
        .then_some(image)
        .flatten()
        .filter(|img| img.is_usable());

    let points = valid
        .iter()
        .map(|&(mut x, mut y)| {
            if let Some(img) = divisor {
                x /= img.width;
                y /= img.height;
            }
            Point {
                x: round4(x).clamp(0.0, 1.0),
                y: round4(y).clamp(0.0, 1.0),
            }
        })
        .collect();

    Some(points)
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Extract every numeric token (integer or decimal, optionally signed) from
/// a path-like string. Letters and other characters only separate tokens.
fn scan_numbers(input: &str) -> Vec<f64> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in input.chars() {
        let extends = ch.is_ascii_digit()
            || (ch == '.' && !current.contains('.'))
            || ((ch == '-' || ch == '+') && current.is_empty());
        if extends {
            current.push(ch);
        } else {
            flush_token(&mut current, &mut tokens);
            // A sign or dot right after a token starts the next one, as in
            // the compact SVG form "100-200" or "1.5.3".
            if ch == '-' || ch == '+' || ch == '.' {
                current.push(ch);
            }
        }
    }
    flush_token(&mut current, &mut tokens);

    tokens
}

fn flush_token(current: &mut String, tokens: &mut Vec<f64>) {
    if !current.is_empty() {
        if let Ok(value) = current.parse::<f64>() {
            if value.is_finite() {
                tokens.push(value);
            }
        }
        current.clear();
    }
}

/// Pair consecutive tokens into (x, y); an odd trailing value is dropped.
fn pair_up(tokens: &[f64]) -> Vec<(f64, f64)> {
    tokens.chunks_exact(2).map(|c| (c[0], c[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size(w: f64, h: f64) -> Option<ImageSize> {
        Some(ImageSize::new(w, h))
    }

    #[test]
    fn svg_path_normalizes_against_image_size() {
        let raw = RawGeometry::Path("M 100 100 L 300 100 L 300 300 L 100 300 Z".into());
        let points = normalize(&raw, size(400.0, 400.0)).unwrap();
        assert_eq!(
            points,
            vec![
                Point { x: 0.25, y: 0.25 },
                Point { x: 0.75, y: 0.25 },
                Point { x: 0.75, y: 0.75 },
                Point { x: 0.25, y: 0.75 },
            ]
        );
    }

    #[test]
    fn pixel_points_stay_inside_unit_square() {
        let raw = RawGeometry::Points(vec![(10.0, 20.0), (500.0, 20.0), (500.0, 900.0)]);
        let points = normalize(&raw, size(400.0, 400.0)).unwrap();
        for p in points {
            assert!((0.0..=1.0).contains(&p.x), "x out of range: {p:?}");
            assert!((0.0..=1.0).contains(&p.y), "y out of range: {p:?}");
        }
    }

    #[test]
    fn already_normalized_points_pass_through() {
        let raw = RawGeometry::PointsObject {
            points: vec![(0.1, 0.2), (0.9, 0.2), (0.5, 0.8)],
        };
        let points = normalize(&raw, size(400.0, 400.0)).unwrap();
        assert_eq!(
            points,
            vec![
                Point { x: 0.1, y: 0.2 },
                Point { x: 0.9, y: 0.2 },
                Point { x: 0.5, y: 0.8 },
            ]
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = RawGeometry::Path("0 0 833 0 833 417".into());
        let first = normalize(&raw, size(833.0, 417.0)).unwrap();
        let again = normalize(
            &RawGeometry::Points(first.iter().map(|p| (p.x, p.y)).collect()),
            size(833.0, 417.0),
        )
        .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn odd_token_count_drops_the_trailing_value() {
        let raw = RawGeometry::Path("0 0 200 0 200 200 7".into());
        let points = normalize(&raw, size(200.0, 200.0)).unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn too_few_points_is_non_renderable() {
        assert_eq!(normalize(&RawGeometry::Path("M 1 2".into()), None), None);
        assert_eq!(normalize(&RawGeometry::Points(vec![(0.0, 0.0), (1.0, 1.0)]), None), None);
    }

    #[test]
    fn unknown_image_size_clamps_only() {
        let raw = RawGeometry::Points(vec![(10.0, 20.0), (500.0, 20.0), (0.5, 0.5)]);
        let points = normalize(&raw, None).unwrap();
        assert_eq!(
            points,
            vec![
                Point { x: 1.0, y: 1.0 },
                Point { x: 1.0, y: 1.0 },
                Point { x: 0.5, y: 0.5 },
            ]
        );
    }

    #[test]
    fn compact_svg_signs_split_tokens() {
        assert_eq!(scan_numbers("10-20.5.25"), vec![10.0, -20.5, 0.25]);
    }
}

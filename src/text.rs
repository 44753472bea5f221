//! Locale-tolerant text and number helpers.
//!
//! Legacy payloads mix diacritics, numeric id suffixes and two decimal
//! separator conventions, often inside a single project. Everything that
//! compares, searches or parses user-entered text goes through here so the
//! rules live in one place.

use std::cmp::Ordering;

/// Lowercase a string and strip extended-Latin diacritics.
///
/// `"Příliš Žluťoučký"` becomes `"prilis zlutoucky"`. Characters outside the
/// mapped range are kept as-is after lowercasing.
#[must_use]
pub fn fold(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        for lower in ch.to_lowercase() {
            match lower {
                'á' | 'à' | 'â' | 'ä' | 'ă' | 'ą' | 'å' => result.push('a'),
                'č' | 'ç' | 'ć' => result.push('c'),
                'ď' | 'đ' => result.push('d'),
                'é' | 'è' | 'ê' | 'ë' | 'ě' | 'ę' => result.push('e'),
                'í' | 'ì' | 'î' | 'ï' => result.push('i'),
                'ľ' | 'ĺ' | 'ł' => result.push('l'),
                'ň' | 'ń' | 'ñ' => result.push('n'),
                'ó' | 'ò' | 'ô' | 'ö' | 'ő' | 'õ' => result.push('o'),
                'ř' | 'ŕ' => result.push('r'),
                'š' | 'ś' | 'ş' => result.push('s'),
                'ť' | 'ţ' => result.push('t'),
                'ú' | 'ù' | 'û' | 'ü' | 'ů' | 'ű' => result.push('u'),
                'ý' | 'ÿ' => result.push('y'),
                'ž' | 'ź' | 'ż' => result.push('z'),
                'ß' => result.push_str("ss"),
                'æ' => result.push_str("ae"),
                'œ' => result.push_str("oe"),
                other => result.push(other),
            }
        }
    }
    result
}

/// Case/diacritic-insensitive substring test.
#[must_use]
pub fn fold_contains(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

/// Natural (numeric-aware) string comparison.
///
/// Digit runs compare by value, so `"dom 2"` sorts before `"dom 10"`.
/// Callers pass already-folded strings when case/diacritic insensitivity is
/// wanted.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < a_bytes.len() && j < b_bytes.len() {
        let ca = a_bytes[i];
        let cb = b_bytes[j];

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let run_a = digit_run(a_bytes, i);
            let run_b = digit_run(b_bytes, j);
            let trimmed_a = trim_leading_zeros(&a_bytes[i..run_a]);
            let trimmed_b = trim_leading_zeros(&b_bytes[j..run_b]);

            let ord = trimmed_a
                .len()
                .cmp(&trimmed_b.len())
                .then_with(|| trimmed_a.cmp(trimmed_b));
            if ord != Ordering::Equal {
                return ord;
            }
            i = run_a;
            j = run_b;
        } else {
            let ord = ca.cmp(&cb);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }

    (a_bytes.len() - i).cmp(&(b_bytes.len() - j))
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn trim_leading_zeros(run: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < run.len() && run[start] == b'0' {
        start += 1;
    }
    &run[start..]
}

/// Tolerant parse of price/area strings mixing separator conventions.
///
/// Disambiguation rule: the last `.`/`,` followed by at most two digits is
/// the decimal point; every other separator (including spaces and
/// apostrophes) is thousands grouping. Currency and unit suffixes are
/// trimmed. Returns `None` when no usable number remains.
#[must_use]
pub fn parse_flexible_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let negative = trimmed.starts_with('-');

    // Collect the numeric body: digits plus separator characters, starting
    // at the first digit (skips currency prefixes like "€ "). Anything after
    // the body must be a unit/currency suffix; a second digit group there
    // makes the field ambiguous.
    let mut body = String::new();
    let mut seen_digit = false;
    let mut in_suffix = false;
    for ch in trimmed.chars() {
        if in_suffix {
            if ch.is_ascii_digit() {
                return None;
            }
            continue;
        }
        match ch {
            '0'..='9' => {
                seen_digit = true;
                body.push(ch);
            }
            '.' | ',' | '\'' | ' ' | '\u{a0}' if seen_digit => body.push(ch),
            _ if seen_digit => in_suffix = true,
            _ => {}
        }
    }

    if !seen_digit {
        return None;
    }

    // Locate the decimal separator: the last '.' or ',' with <=2 digits
    // after it inside the body.
    let separators: Vec<(usize, char)> = body
        .char_indices()
        .filter(|(_, c)| *c == '.' || *c == ',')
        .collect();
    let decimal_pos = separators.last().and_then(|&(pos, _)| {
        let tail_digits = body[pos + 1..].chars().filter(char::is_ascii_digit).count();
        (tail_digits <= 2).then_some(pos)
    });

    let mut normalized = String::with_capacity(body.len());
    if negative {
        normalized.push('-');
    }
    for (pos, ch) in body.char_indices() {
        if ch.is_ascii_digit() {
            normalized.push(ch);
        } else if Some(pos) == decimal_pos {
            normalized.push('.');
        }
        // Grouping separators are dropped.
    }

    normalized.trim_end_matches('.').parse::<f64>().ok()
}

/// Slugify a name into an externally addressable key.
///
/// Diacritics are transliterated, everything non-alphanumeric collapses to
/// single dashes. `"Rezidence U Tržnice 2"` becomes `"rezidence-u-trznice-2"`.
#[must_use]
pub fn slugify(s: &str) -> String {
    let folded = fold(s);
    let mut slug = String::with_capacity(folded.len());
    let mut last_dash = true;
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

//! Edit distance and fuzzy-match tolerance.

/// Length breakpoints for the allowed fuzzy distance.
///
/// A string of up to `max_len` characters tolerates `distance` edits; longer
/// strings fall through to [`LONG_DISTANCE`].
const DISTANCE_BRACKETS: [(usize, usize); 2] = [(4, 1), (8, 2)];

/// Allowed distance for strings longer than every bracket.
const LONG_DISTANCE: usize = 4;

/// Levenshtein distance between two strings, counted in `char`s.
///
/// Insertions, deletions and substitutions all cost 1. Uses a single
/// rolling row sized by the shorter input.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // the row follows the shorter string
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, &lc) in long.iter().enumerate() {
        // row[0] of the new line, and the diagonal of the old one
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if lc == sc {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[short.len()]
}

/// Maximum edit distance tolerated for a fuzzy match against `s`.
///
/// Up to 4 characters allow 1 edit, up to 8 allow 2, anything longer 4.
#[must_use]
pub fn max_allowed_distance(s: &str) -> usize {
    distance_for_len(s.chars().count())
}

/// Maximum edit distance tolerated between two strings, bracketed by the
/// longer of the two.
#[must_use]
pub fn max_allowed_distance_between(a: &str, b: &str) -> usize {
    distance_for_len(a.chars().count().max(b.chars().count()))
}

fn distance_for_len(len: usize) -> usize {
    DISTANCE_BRACKETS
        .iter()
        .find(|(max_len, _)| len <= *max_len)
        .map_or(LONG_DISTANCE, |(_, distance)| *distance)
}

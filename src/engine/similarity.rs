//! Bigram similarity.
//!
//! The metric is the Sørensen–Dice coefficient over overlapping character
//! pairs, computed on whitespace-stripped input:
//!
//! ```text
//! "night" -> ni ig gh ht        "nacht" -> na ac ch ht
//!
//!            2 * |shared|            2 * 1
//! score = ------------------- = ------------- = 0.25
//!          |a| + |b| - 2          5 + 5 - 2
//! ```
//!
//! Shared bigrams are consumed one-to-one: a pair repeated twice in the second
//! string only counts twice if the first string also holds it twice.
//!
//! ## Invariants
//!
//! - The score is always within `[0, 1]`.
//! - The score is exactly `1` only when the stripped strings are equal.
//! - Lengths are counted in `char`s, so multi-byte text behaves like ASCII.

use std::collections::HashMap;

/// Score how alike `first` and `second` are, from `0.0` (nothing shared) to
/// `1.0` (identical once whitespace is removed).
///
/// Case is compared as-is; callers lowercase both sides when they want a
/// case-insensitive comparison.
pub fn similarity(first: &str, second: &str) -> f64 {
    let first = strip_whitespace(first);
    let second = strip_whitespace(second);

    if first == second {
        return 1.0;
    }
    if first.len() < 2 || second.len() < 2 {
        return 0.0;
    }

    let mut first_bigrams: HashMap<(char, char), usize> = HashMap::with_capacity(first.len() - 1);
    for pair in first.windows(2) {
        *first_bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut intersection = 0usize;
    for pair in second.windows(2) {
        if let Some(count) = first_bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                intersection += 1;
            }
        }
    }

    (2.0 * intersection as f64) / ((first.len() + second.len() - 2) as f64)
}

fn strip_whitespace(s: &str) -> Vec<char> {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

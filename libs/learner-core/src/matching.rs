//! Answer matching with typo forgiveness.

use serde::{Deserialize, Serialize};

/// How a typed answer relates to the expected term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Equal ignoring case.
    Exact,
    /// Not equal, but similar enough to be a typo.
    NearMiss,
    Wrong,
}

/// Result of comparing a typed answer to the expected term.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchResult {
    pub verdict: Verdict,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
}

/// Compare a typed answer to the expected term.
pub fn compare_answers(typed: &str, expected: &str, threshold: f64) -> MatchResult {
    let typed = typed.to_lowercase();
    let expected = expected.to_lowercase();

    if typed == expected {
        return MatchResult {
            verdict: Verdict::Exact,
            similarity: 1.0,
        };
    }

    let similarity = ratio(&typed, &expected);
    let verdict = if similarity >= threshold {
        Verdict::NearMiss
    } else {
        Verdict::Wrong
    };
    MatchResult {
        verdict,
        similarity,
    }
}

/// True when `ratio(a, b)` reaches `threshold`.
pub fn is_typo(a: &str, b: &str, threshold: f64) -> bool {
    ratio(a, b) >= threshold
}

/// Matching-blocks similarity: `2 * M / (len(a) + len(b))`, where `M` counts
/// the characters in the recursively found longest common blocks.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 1.0; // Both empty strings are identical
    }

    let matched = matching_characters(&a_chars, &b_chars);
    2.0 * matched as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common block of `a[a_lo..a_hi]` and `b[b_lo..b_hi]`, earliest on ties.
fn longest_match(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best) = (a_lo, b_lo, 0);

    // prev[k + 1] is the length of the block ending at a[i - 1], b[b_lo + k]
    let width = b_hi - b_lo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in a_lo..a_hi {
        curr.iter_mut().for_each(|len| *len = 0);
        for j in b_lo..b_hi {
            if a[i] != b[j] {
                continue;
            }
            let len = prev[j - b_lo] + 1;
            curr[j - b_lo + 1] = len;
            if len > best {
                best_i = i + 1 - len;
                best_j = j + 1 - len;
                best = len;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best)
}

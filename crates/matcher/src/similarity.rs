//! Text similarity for fuzzy matching.
//!
//! [`sequence_ratio`] is the Ratcliff/Obershelp "gestalt" ratio: find the
//! longest common block, recurse on both sides of it, and report
//! `2 * matched / (len_a + len_b)`. Units are chars, not bytes.

use std::collections::HashMap;

use matchkit_core::value::field_text;
use matchkit_core::Record;

/// Second strings at least this long get the popular-element heuristic.
const POPULAR_MIN_LEN: usize = 200;

/// Similarity of two strings in [0, 1]. Two empty strings are identical.
///
/// Not symmetric in general: `b` is indexed and its popular elements pruned.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = SequenceMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Mean per-field [`sequence_ratio`] over `fields`.
///
/// A field only counts when both sides render to non-empty text; absent and
/// null values render empty. Returns 0.0 when no field was comparable.
pub fn similarity(a: &Record, b: &Record, fields: &[String]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for field in fields {
        let left = field_text(a.get(field));
        let right = field_text(b.get(field));
        if left.is_empty() || right.is_empty() {
            continue;
        }
        sum += sequence_ratio(&left, &right);
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

struct SequenceMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    /// Positions of each element of `b`, ascending. Popular elements removed.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> SequenceMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest block with `a[i..i+k] == b[j..j+k]` inside the given ranges.
    /// Earliest `i`, then earliest `j`, wins among equally long blocks.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        // j2len[j] = length of the block ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0);
                    let k = prev + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular elements are absent from b2j; grow the block through them.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    /// Total size of all matching blocks.
    fn matched_len(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        matched
    }
}

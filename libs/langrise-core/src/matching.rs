//! Answer grading for the typed-word game.
//!
//! Similarity follows the classic longest-matching-block sequence ratio:
//! find the longest common substring, recurse on what lies left and right of
//! it, and score `2 * matched / total_len`.

use std::collections::HashMap;

use crate::types::Quality;

/// Similarity thresholds, highest first. The first one reached wins.
const GRADE_THRESHOLDS: [(f64, u8); 5] = [(0.96, 5), (0.88, 4), (0.75, 3), (0.60, 2), (0.45, 1)];

/// Inputs at least this long get the popular-character heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Result of comparing a typed answer to the expected word.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    pub grade: Quality,
}

/// Compare a typed answer to the expected word, case-insensitively.
pub fn compare_answers(typed: &str, expected: &str) -> MatchResult {
    let similarity = similarity_ratio(&expected.to_lowercase(), &typed.to_lowercase());
    MatchResult {
        similarity,
        grade: grade_for_similarity(similarity),
    }
}

/// Grade a typed answer against the expected word.
pub fn grade(expected: &str, typed: &str) -> Quality {
    compare_answers(typed, expected).grade
}

/// Map a similarity ratio onto a 0-5 grade.
pub fn grade_for_similarity(ratio: f64) -> Quality {
    let value = GRADE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| ratio >= *threshold)
        .map(|(_, grade)| *grade)
        .unwrap_or(0);
    Quality::saturating(value)
}

/// Sequence similarity of `a` and `b` in 0.0..=1.0. Case-sensitive.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0; // Both empty strings are identical
    }

    let matched = SequenceMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Longest-matching-block matcher over two char sequences.
struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each char in `b`, minus popular chars.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular_above = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular_above);
        }

        Self { a, b, b2j }
    }

    /// Total length of all matching blocks.
    fn matched_len(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
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

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given ranges.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    next_j2len.insert(j, k);
                    if k > best_k {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular chars never seed a match but may still extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi
            && best_j + best_k < bhi
            && self.a[best_i + best_k] == self.b[best_j + best_k]
        {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }
}

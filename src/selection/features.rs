use crate::table::Table;
use serde::Serialize;
use tracing::warn;

/// Outcome of resolving one proposed feature name against the header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureMatch {
    /// Name as proposed
    pub requested: String,
    /// Outermost label of the matched column, if any
    pub matched: Option<String>,
    /// Index of the first column carrying that label
    pub column: Option<usize>,
    /// Similarity of the best candidate in `0.0..=1.0`
    pub score: f64,
}

/// Case-folded alphanumeric tokens, sorted and rejoined with single spaces.
fn token_sorted(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|character| if character.is_alphanumeric() { character } else { ' ' })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Length of the longest common subsequence of two character sequences.
fn longest_common_subsequence(left: &[char], right: &[char]) -> usize {
    let mut previous = vec![0usize; right.len() + 1];
    let mut current = vec![0usize; right.len() + 1];
    for &character in left {
        for (index, &other) in right.iter().enumerate() {
            current[index + 1] = if character == other {
                previous[index] + 1
            } else {
                current[index].max(previous[index + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[right.len()]
}

/// Token-sorted Indel ratio `2 * LCS / (|a| + |b|)` in `0.0..=1.0`.
pub(crate) fn similarity(left: &str, right: &str) -> f64 {
    let left: Vec<char> = token_sorted(left).chars().collect();
    let right: Vec<char> = token_sorted(right).chars().collect();
    let total = left.len() + right.len();
    if total == 0 {
        return 0.0;
    }
    2.0 * longest_common_subsequence(&left, &right) as f64 / total as f64
}

/// Maps each proposed name to the closest outermost header label. Exact
/// labels win outright; otherwise the best candidate must reach
/// `threshold`. Misses are logged and reported, never fatal.
pub fn resolve_features(table: &Table, requested: &[String], threshold: f64) -> Vec<FeatureMatch> {
    let labels = table.level_values(0);
    requested
        .iter()
        .map(|name| {
            let best = labels
                .iter()
                .enumerate()
                .map(|(index, label)| {
                    let score = if label == name { 1.0 } else { similarity(name, label) };
                    (index, *label, score)
                })
                .fold(None::<(usize, &str, f64)>, |best, candidate| match best {
                    Some(best) if best.2 >= candidate.2 => Some(best),
                    _ => Some(candidate),
                });
            match best {
                Some((index, label, score)) if score >= threshold => FeatureMatch {
                    requested: name.to_owned(),
                    matched: Some(label.to_owned()),
                    column: Some(index),
                    score,
                },
                other => {
                    let score = other.map(|(_, _, score)| score).unwrap_or(0.0);
                    warn!(feature = name.as_str(), score, "no header label matches feature");
                    FeatureMatch {
                        requested: name.to_owned(),
                        matched: None,
                        column: None,
                        score,
                    }
                }
            }
        })
        .collect()
}

/// Matched labels in request order, misses dropped.
pub fn resolved_names(matches: &[FeatureMatch]) -> Vec<String> {
    matches.iter().filter_map(|feature| feature.matched.clone()).collect()
}

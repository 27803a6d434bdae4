use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// Maximum number of entries kept in the ranking
pub const RANKING_CAPACITY: usize = 10;

/// Single submitted result within the ranking. Only the fields
/// used for ordering are typed, anything else the client sent
/// (nickname etc) is carried through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Score achieved, higher is better
    pub score: Number,
    /// Time taken, lower is better
    pub time: Number,
    /// Milliseconds since the epoch when the entry was created, also
    /// used by clients to find their own entry in the ranking. An
    /// explicit `null` is the same as leaving it out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Passthrough fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RankingEntry {
    /// Ordering of two entries within the ranking, score descending
    /// then time ascending
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        compare_numbers(&other.score, &self.score)
            .then_with(|| compare_numbers(&self.time, &other.time))
    }
}

/// Numeric comparison between two JSON numbers. Integers are compared
/// exactly, anything involving a float falls back to a total order
/// over f64
pub fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a.cmp(&b);
    }

    let a = a.as_f64().unwrap_or(f64::NAN);
    let b = b.as_f64().unwrap_or(f64::NAN);
    a.total_cmp(&b)
}

/// Sorts the ranking into its ranked order. The sort is stable so
/// entries with an equal score and time keep their insertion order
pub fn sort_ranking(ranking: &mut [RankingEntry]) {
    ranking.sort_by(RankingEntry::rank_cmp);
}

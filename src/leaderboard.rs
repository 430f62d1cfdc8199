//! Top-K leaderboards over a record subset.

use crate::dataset::{PlayerRecord, Statistic};

/// Leaderboards are capped at the top ten.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Statistics offered by the leaderboard selector, in display order.
pub const LEADERBOARD_STATS: [Statistic; 5] = [
    Statistic::Points,
    Statistic::Rebounds,
    Statistic::Assists,
    Statistic::Steals,
    Statistic::Blocks,
];

/// Top `k` records by `stat`, descending. The sort is stable, so records
/// with equal values keep their relative source order and the output is
/// reproducible. Fewer than `k` records in, fewer out; empty in, empty out.
pub fn top_k(records: &[PlayerRecord], stat: Statistic, k: usize) -> Vec<PlayerRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| stat.value(b).total_cmp(&stat.value(a)));
    ranked.truncate(k);
    ranked
}

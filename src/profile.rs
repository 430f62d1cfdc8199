//! Min-max normalized player profile vectors.

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, PlayerRecord, Statistic};
use crate::error::AnalysisResult;

/// Profile axes, in display order.
pub const PROFILE_STATS: [Statistic; 5] = [
    Statistic::Points,
    Statistic::Rebounds,
    Statistic::Assists,
    Statistic::Steals,
    Statistic::Blocks,
];

/// Closed profile length: one value per axis plus the repeated first value.
pub const PROFILE_LEN: usize = PROFILE_STATS.len() + 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct StatRange {
    min: f64,
    max: f64,
}

/// Per-axis min-max scaling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    ranges: [StatRange; PROFILE_STATS.len()],
}

impl NormalizationParams {
    /// Fit over the entire dataset, never a filtered subset: a player's
    /// profile shape must not change with the active team filter.
    pub fn fit(dataset: &Dataset) -> Self {
        let ranges = PROFILE_STATS.map(|stat| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for record in dataset.players() {
                let value = stat.value(record);
                min = min.min(value);
                max = max.max(value);
            }
            StatRange { min, max }
        });
        Self { ranges }
    }

    /// Scale `value` on `axis` into [0,1]. Zero variance across the
    /// population normalizes to 0 by policy rather than dividing by zero.
    fn normalize(&self, axis: usize, value: f64) -> f64 {
        let StatRange { min, max } = self.ranges[axis];
        let span = max - min;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value - min) / span).clamp(0.0, 1.0)
    }
}

/// Closed profile vector for the player named `name`: one value per
/// [`PROFILE_STATS`] axis in [0,1], with the first value repeated at the
/// end. The duplication is part of the contract: consumers draw a closed
/// polygon without post-processing.
pub fn player_profile(
    dataset: &Dataset,
    params: &NormalizationParams,
    name: &str,
) -> AnalysisResult<Vec<f64>> {
    let record = dataset.find_player(name)?;
    Ok(profile_of(params, record))
}

/// Closed profile vector for an already-resolved record.
pub fn profile_of(params: &NormalizationParams, record: &PlayerRecord) -> Vec<f64> {
    let mut profile: Vec<f64> = PROFILE_STATS
        .iter()
        .enumerate()
        .map(|(axis, stat)| params.normalize(axis, stat.value(record)))
        .collect();
    profile.push(profile[0]);
    profile
}

/// Headline metrics for the single-player summary row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub efg: f64,
}

pub fn headline(record: &PlayerRecord) -> HeadlineMetrics {
    HeadlineMetrics {
        points: record.points,
        rebounds: record.rebounds,
        assists: record.assists,
        efg: record.efg,
    }
}

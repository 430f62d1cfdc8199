//! Efficiency-vs-volume quadrant classification.
//!
//! The population is first restricted to its volume-relevant part (strictly
//! above the 25th percentile of field-goal attempts), then split at the
//! medians of attempts (x) and effective field-goal percentage (y). The
//! medians travel with the result so consumers can draw reference lines.

use serde::{Deserialize, Serialize};

use crate::dataset::{PlayerRecord, Statistic};

/// Volume axis: relevance threshold and the x split.
pub const VOLUME_STAT: Statistic = Statistic::Attempts;
/// Efficiency axis: the y split.
pub const EFFICIENCY_STAT: Statistic = Statistic::EffectiveFgPct;

/// Share of the population excluded as low-volume before classification.
const RELEVANCE_QUANTILE: f64 = 0.25;

/// One of four mutually exclusive classification buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// High volume, high efficiency.
    Superstar,
    /// High volume, low efficiency.
    Inefficient,
    /// Low volume, high efficiency.
    Specialist,
    /// Low volume, low efficiency.
    Limited,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Superstar,
        Quadrant::Inefficient,
        Quadrant::Specialist,
        Quadrant::Limited,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Superstar => "Superstar",
            Quadrant::Inefficient => "Inefficient",
            Quadrant::Specialist => "Specialist",
            Quadrant::Limited => "Limited",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuadrantEntry {
    pub record: PlayerRecord,
    pub quadrant: Quadrant,
}

/// Quadrant labels for the relevant subset plus the median split values.
#[derive(Debug, Clone, Serialize)]
pub struct QuadrantAnalysis {
    pub entries: Vec<QuadrantEntry>,
    pub median_volume: f64,
    pub median_efficiency: f64,
}

impl QuadrantAnalysis {
    /// Entry count per quadrant, in `Quadrant::ALL` order.
    pub fn counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for entry in &self.entries {
            let idx = Quadrant::ALL
                .iter()
                .position(|q| *q == entry.quadrant)
                .unwrap_or(0);
            counts[idx] += 1;
        }
        counts
    }
}

/// Classify `records`. `None` means there is nothing to chart: the input
/// was empty, or the volume threshold left no relevant records (e.g. every
/// player tied on attempts).
pub fn classify(records: &[PlayerRecord]) -> Option<QuadrantAnalysis> {
    let volumes = sorted_values(records.iter(), VOLUME_STAT);
    let threshold = quantile(&volumes, RELEVANCE_QUANTILE)?;

    let relevant: Vec<&PlayerRecord> = records
        .iter()
        .filter(|r| VOLUME_STAT.value(r) > threshold)
        .collect();
    if relevant.is_empty() {
        return None;
    }

    let median_volume = quantile(&sorted_values(relevant.iter().copied(), VOLUME_STAT), 0.5)?;
    let median_efficiency = quantile(
        &sorted_values(relevant.iter().copied(), EFFICIENCY_STAT),
        0.5,
    )?;

    let entries = relevant
        .into_iter()
        .map(|record| QuadrantEntry {
            quadrant: quadrant_for(
                VOLUME_STAT.value(record),
                EFFICIENCY_STAT.value(record),
                median_volume,
                median_efficiency,
            ),
            record: record.clone(),
        })
        .collect();

    Some(QuadrantAnalysis {
        entries,
        median_volume,
        median_efficiency,
    })
}

/// Equality with a median counts as the high side.
fn quadrant_for(volume: f64, efficiency: f64, median_volume: f64, median_efficiency: f64) -> Quadrant {
    match (volume >= median_volume, efficiency >= median_efficiency) {
        (true, true) => Quadrant::Superstar,
        (true, false) => Quadrant::Inefficient,
        (false, true) => Quadrant::Specialist,
        (false, false) => Quadrant::Limited,
    }
}

fn sorted_values<'a>(
    records: impl Iterator<Item = &'a PlayerRecord>,
    stat: Statistic,
) -> Vec<f64> {
    let mut values: Vec<f64> = records.map(|r| stat.value(r)).collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Quantile of pre-sorted `values` with linear interpolation between order
/// statistics. `None` on empty input.
fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let position = q * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Some(values[lower]);
    }
    let fraction = position - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * fraction)
}

#[cfg(test)]
mod tests {
    use super::{Quadrant, quadrant_for, quantile};

    #[test]
    fn quantile_interpolates() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.25), Some(1.75));
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 0.5), Some(2.0));
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 1.0), Some(3.0));
    }

    #[test]
    fn median_ties_count_as_high() {
        assert_eq!(quadrant_for(10.0, 0.5, 10.0, 0.5), Quadrant::Superstar);
        assert_eq!(quadrant_for(10.0, 0.4, 10.0, 0.5), Quadrant::Inefficient);
        assert_eq!(quadrant_for(9.0, 0.5, 10.0, 0.5), Quadrant::Specialist);
        assert_eq!(quadrant_for(9.0, 0.4, 10.0, 0.5), Quadrant::Limited);
    }
}

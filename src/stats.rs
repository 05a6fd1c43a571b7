//! Per-fight results and aggregation across Monte Carlo iterations

use serde::Serialize;
use std::collections::BTreeMap;

/// Special attack uses, keyed by weapon name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpecTracker {
    uses: BTreeMap<String, u64>,
}

impl SpecTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, weapon: &str) {
        *self.uses.entry(weapon.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, weapon: &str) -> u64 {
        self.uses.get(weapon).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.uses.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }

    pub fn uses(&self) -> &BTreeMap<String, u64> {
        &self.uses
    }

    /// Fold another tracker's counts into this one
    pub fn merge(&mut self, other: &SpecTracker) {
        for (weapon, count) in &other.uses {
            *self.uses.entry(weapon.clone()).or_insert(0) += count;
        }
    }

    /// Average uses per iteration
    pub fn averages(&self, iterations: usize) -> BTreeMap<String, f64> {
        if iterations == 0 {
            return BTreeMap::new();
        }
        self.uses
            .iter()
            .map(|(weapon, count)| (weapon.clone(), *count as f64 / iterations as f64))
            .collect()
    }
}

/// Outcome of a single simulated fight
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimResult {
    pub ticks: u32,
    pub specs: SpecTracker,
}

/// Statistics over a batch of fights
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedStats {
    pub iterations: usize,
    pub avg_ticks: f64,
    pub std_ticks: f64,
    pub min_ticks: u32,
    pub max_ticks: u32,
    pub avg_seconds: f64,
    pub spec_totals: SpecTracker,
    pub spec_averages: BTreeMap<String, f64>,
}

impl AggregatedStats {
    pub fn from_results(results: &[SimResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let n = results.len() as f64;
        let avg_ticks = results.iter().map(|r| r.ticks as f64).sum::<f64>() / n;
        let variance = results
            .iter()
            .map(|r| {
                let d = r.ticks as f64 - avg_ticks;
                d * d
            })
            .sum::<f64>()
            / n;

        let mut spec_totals = SpecTracker::new();
        for r in results {
            spec_totals.merge(&r.specs);
        }
        let spec_averages = spec_totals.averages(results.len());

        Self {
            iterations: results.len(),
            avg_ticks,
            std_ticks: variance.sqrt(),
            min_ticks: results.iter().map(|r| r.ticks).min().unwrap_or(0),
            max_ticks: results.iter().map(|r| r.ticks).max().unwrap_or(0),
            avg_seconds: avg_ticks * crate::tick::Tick::SECONDS,
            spec_totals,
            spec_averages,
        }
    }
}

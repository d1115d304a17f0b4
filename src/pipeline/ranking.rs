//! Annual capacity factors and the plant ranking.

use std::collections::BTreeMap;

use tracing::debug;

use super::capacity_factor::MonthlyCapacityFactor;

/// Capacity factor of one plant over one report year.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualCapacityFactor {
    pub plant: String,
    pub year: i32,
    /// Sum of clipped monthly net generation (MWh).
    pub netgen_mwh: f64,
    /// Sum of monthly maximum possible generation (MWh).
    pub max_possible_mwh: f64,
    /// `netgen_mwh / max_possible_mwh`.
    pub capacity_factor: f64,
}

/// A plant's average annual capacity factor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantRanking {
    pub plant: String,
    /// Mean of the plant's positive annual capacity factors.
    pub capacity_factor: f64,
    /// Number of years averaged.
    pub years: usize,
}

/// Aggregates monthly rows into annual capacity factors per plant-year.
///
/// The annual factor divides summed generation by summed maximum possible
/// generation; monthly ratios are never averaged. Plant-years whose factor is
/// not strictly positive (extended outages) are excluded. Output is ordered
/// by plant, then year.
pub fn annual_capacity_factors(monthly: &[MonthlyCapacityFactor]) -> Vec<AnnualCapacityFactor> {
    let mut sums: BTreeMap<(&str, i32), (f64, f64)> = BTreeMap::new();
    for m in monthly {
        let entry = sums.entry((m.plant.as_str(), m.year)).or_insert((0.0, 0.0));
        entry.0 += m.netgen_mwh;
        entry.1 += m.max_possible_mwh;
    }

    let total = sums.len();
    let annual: Vec<AnnualCapacityFactor> = sums
        .into_iter()
        .map(|((plant, year), (netgen_mwh, max_possible_mwh))| AnnualCapacityFactor {
            plant: plant.to_string(),
            year,
            netgen_mwh,
            max_possible_mwh,
            capacity_factor: netgen_mwh / max_possible_mwh,
        })
        .filter(|a| a.capacity_factor > 0.0)
        .collect();
    debug!(
        plant_years = total,
        outage_years = total - annual.len(),
        "computed annual capacity factors"
    );
    annual
}

/// Ranks plants by their mean annual capacity factor, highest first.
///
/// Ties are broken by plant name so the ranking is deterministic.
pub fn rank_plants(annual: &[AnnualCapacityFactor]) -> Vec<PlantRanking> {
    let mut by_plant: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for a in annual {
        let entry = by_plant.entry(a.plant.as_str()).or_insert((0.0, 0));
        entry.0 += a.capacity_factor;
        entry.1 += 1;
    }

    let mut ranking: Vec<PlantRanking> = by_plant
        .into_iter()
        .map(|(plant, (sum, years))| PlantRanking {
            plant: plant.to_string(),
            capacity_factor: sum / years as f64,
            years,
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.capacity_factor
            .total_cmp(&a.capacity_factor)
            .then_with(|| a.plant.cmp(&b.plant))
    });
    ranking
}

/// The first `n` entries of a ranking.
pub fn top(ranking: &[PlantRanking], n: usize) -> &[PlantRanking] {
    &ranking[..n.min(ranking.len())]
}

/// The last `n` entries of a ranking, still in descending order.
pub fn bottom(ranking: &[PlantRanking], n: usize) -> &[PlantRanking] {
    &ranking[ranking.len().saturating_sub(n)..]
}

use std::collections::BTreeMap;
use std::fmt::Write;

use hashbrown::HashMap;
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
    Serializer,
};

use super::block::CountsBlock;
use super::enums::Context;
use super::typedef::{
    ContextCode,
    CountType,
    RatioType,
};

/// Serializes a HashMap in deterministic order.
fn serialize_sorted_map<S, K: Ord + Serialize, V: Serialize>(
    map: &HashMap<K, V>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer, {
    let sorted_map: BTreeMap<_, _> = map.iter().collect();
    sorted_map.serialize(serializer)
}

/// Summary of a [`CountsBlock`]: methylation level over the sites that
/// passed the coverage filter, their coverage distribution and the
/// methylation level per context code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlockStats {
    /// Number of sites in the summarized blocks, filtered ones included.
    n_sites: u64,

    /// Mean methylation ratio over valid sites.
    mean_methylation: RatioType,

    /// Population variance of the methylation ratio over valid sites.
    methylation_var: RatioType,

    /// Maps coverage to frequency.
    #[serde(serialize_with = "serialize_sorted_map")]
    coverage_distribution: HashMap<CountType, u32>,

    /// Sum of methylation ratios and number of valid sites per context
    /// code.
    #[serde(serialize_with = "serialize_sorted_map")]
    context_methylation: HashMap<ContextCode, (RatioType, u32)>,
}

impl BlockStats {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self {
            n_sites:               0,
            mean_methylation:      0.0,
            methylation_var:       0.0,
            coverage_distribution: HashMap::new(),
            context_methylation:   HashMap::new(),
        }
    }

    /// Summarizes a counts block. Sites with a zero total are the ones the
    /// filter dropped and only count towards [`BlockStats::n_sites`].
    pub fn from_counts(block: &CountsBlock) -> Self {
        let mut stats = Self::new();
        stats.n_sites = block.len() as u64;

        let mut ratios = Vec::with_capacity(block.len());
        for (methylated, total, context) in block.iter().filter(|(_, total, _)| *total > 0) {
            let ratio = methylated as RatioType / total as RatioType;
            ratios.push(ratio);

            *stats.coverage_distribution.entry(total).or_insert(0) += 1;
            let entry = stats
                .context_methylation
                .entry(context)
                .or_insert((0.0, 0));
            entry.0 += ratio;
            entry.1 += 1;
        }

        if !ratios.is_empty() {
            let n = ratios.len() as RatioType;
            let mean = ratios.iter().sum::<RatioType>() / n;
            let var = ratios
                .iter()
                .map(|ratio| (ratio - mean) * (ratio - mean))
                .sum::<RatioType>()
                / n;
            stats.mean_methylation = mean;
            stats.methylation_var = var;
        }

        stats
    }

    /// Merges another instance into this one using weighted averages based on
    /// the number of valid sites.
    pub fn merge(
        &mut self,
        other: &BlockStats,
    ) {
        let weight_self = self.n_valid() as RatioType;
        let weight_other = other.n_valid() as RatioType;
        let total_weight = weight_self + weight_other;

        if total_weight > 0.0 {
            let delta = self.mean_methylation - other.mean_methylation;
            self.mean_methylation = (weight_self * self.mean_methylation
                + weight_other * other.mean_methylation)
                / total_weight;

            // Variance of the union, corrected for the shift between means
            self.methylation_var = ((weight_self * self.methylation_var
                + weight_other * other.methylation_var)
                + (weight_self * weight_other / total_weight) * (delta * delta))
                / total_weight;
        }

        self.n_sites = self.n_sites.saturating_add(other.n_sites);

        for (&coverage, &frequency) in &other.coverage_distribution {
            let entry = self.coverage_distribution.entry(coverage).or_insert(0);
            *entry = entry.saturating_add(frequency);
        }

        for (&context, &(sum_methylation, count)) in &other.context_methylation {
            let entry = self
                .context_methylation
                .entry(context)
                .or_insert((0.0, 0));
            entry.0 += sum_methylation;
            entry.1 = entry.1.saturating_add(count);
        }
    }

    /// Merges multiple instances.
    pub fn merge_multiple(stats_list: &[BlockStats]) -> Self {
        let mut merged = BlockStats::new();
        for stats in stats_list.iter() {
            merged.merge(stats);
        }
        merged
    }

    pub fn n_sites(&self) -> u64 {
        self.n_sites
    }

    /// Number of sites that passed the coverage filter.
    pub fn n_valid(&self) -> u64 {
        self.coverage_distribution
            .values()
            .map(|&frequency| frequency as u64)
            .sum()
    }

    pub fn mean_methylation(&self) -> RatioType {
        if self.n_valid() == 0 {
            0.0
        }
        else {
            self.mean_methylation
        }
    }

    pub fn methylation_var(&self) -> RatioType {
        self.methylation_var
    }

    /// Average coverage of the valid sites.
    pub fn mean_coverage(&self) -> f64 {
        let n_valid = self.n_valid();
        if n_valid == 0 {
            return 0.0;
        }
        self.coverage_distribution
            .iter()
            .map(|(&coverage, &frequency)| coverage as f64 * frequency as f64)
            .sum::<f64>()
            / n_valid as f64
    }

    pub fn coverage_distribution(&self) -> &HashMap<CountType, u32> {
        &self.coverage_distribution
    }

    pub fn context_methylation(&self) -> &HashMap<ContextCode, (RatioType, u32)> {
        &self.context_methylation
    }

    /// Mean methylation and number of valid sites for one context code.
    pub fn context_mean(
        &self,
        context: ContextCode,
    ) -> Option<(RatioType, u32)> {
        self.context_methylation
            .get(&context)
            .filter(|(_, count)| *count > 0)
            .map(|&(sum, count)| (sum / count as RatioType, count))
    }

    /// Generates a detailed text representation.
    pub fn display_long(&self) -> Result<String, std::fmt::Error> {
        let mut buf = String::new();

        writeln!(buf, "Sites: {}", self.n_sites)?;
        writeln!(buf, "Valid sites: {}", self.n_valid())?;
        writeln!(buf, "Methylation mean: {:.6}", self.mean_methylation())?;
        writeln!(buf, "Methylation variance: {:.6}", self.methylation_var)?;
        writeln!(buf)?;

        writeln!(buf, "Coverage distribution:")?;
        writeln!(buf, "coverage\tcount")?;
        for (coverage, frequency) in self
            .coverage_distribution
            .iter()
            .sorted_by_key(|(k, _)| **k)
        {
            writeln!(buf, "{}\t{}", coverage, frequency)?;
        }
        writeln!(buf)?;

        writeln!(buf, "Methylation per context:")?;
        writeln!(buf, "context\tmean\tcount")?;
        for context in self.context_methylation.keys().copied().sorted() {
            if let Some((mean, count)) = self.context_mean(context) {
                let label = Context::from_code(context)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| context.to_string());
                writeln!(buf, "{}\t{:.6}\t{}", label, mean, count)?;
            }
        }

        Ok(buf)
    }
}

impl Default for BlockStats {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CountsBlock> for BlockStats {
    fn from(block: &CountsBlock) -> Self {
        Self::from_counts(block)
    }
}

use itertools::izip;
use ndarray::Array1;
use serde::{
    Deserialize,
    Serialize,
};

use super::enums::FetchMode;
use super::filter::FilteredRecord;
use super::typedef::{
    ContextCode,
    CountType,
    RatioType,
    NO_RATIO,
};
use crate::error::{
    FetchError,
    Result,
};
use crate::getter_fn;

/// Counts projection of a block: filtered methylated counts, filtered total
/// counts and the context codes, index-aligned with the records on disk.
///
/// Filtered sites carry `(0, 0)`; the context is never filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountsBlock {
    methylated: Array1<CountType>,
    total:      Array1<CountType>,
    context:    Array1<ContextCode>,
}

impl CountsBlock {
    /// Builds a block from already filtered columns.
    pub fn try_from_columns(
        methylated: Vec<CountType>,
        total: Vec<CountType>,
        context: Vec<ContextCode>,
    ) -> Result<Self> {
        if methylated.len() != total.len() || total.len() != context.len() {
            return Err(FetchError::invalid_parameter(
                "columns",
                format!(
                    "column lengths differ (methylated {}, total {}, context {})",
                    methylated.len(),
                    total.len(),
                    context.len()
                ),
            ));
        }
        Ok(Self {
            methylated: Array1::from_vec(methylated),
            total:      Array1::from_vec(total),
            context:    Array1::from_vec(context),
        })
    }

    getter_fn!(methylated, Array1<CountType>);
    getter_fn!(total, Array1<CountType>);
    getter_fn!(context, Array1<ContextCode>);

    pub fn len(&self) -> usize {
        self.context.len()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }

    /// Iterates over `(methylated, total, context)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (CountType, CountType, ContextCode)> + '_ {
        izip!(
            self.methylated.iter().copied(),
            self.total.iter().copied(),
            self.context.iter().copied()
        )
    }

    /// Ratio view of the same sites. Filtered sites have a zero total and
    /// map to [`NO_RATIO`].
    pub fn ratios(&self) -> RatioBlock {
        let ratio = self
            .methylated
            .iter()
            .zip(self.total.iter())
            .map(|(&methylated, &total)| {
                if total == 0 {
                    NO_RATIO
                }
                else {
                    methylated as RatioType / total as RatioType
                }
            })
            .collect::<Vec<_>>();
        RatioBlock {
            ratio: Array1::from_vec(ratio),
        }
    }

    pub fn into_arrays(self) -> (Array1<CountType>, Array1<CountType>, Array1<ContextCode>) {
        (self.methylated, self.total, self.context)
    }
}

impl FromIterator<FilteredRecord> for CountsBlock {
    fn from_iter<I: IntoIterator<Item = FilteredRecord>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (capacity, _) = iter.size_hint();
        let mut methylated = Vec::with_capacity(capacity);
        let mut total = Vec::with_capacity(capacity);
        let mut context = Vec::with_capacity(capacity);

        for site in iter {
            let record = site.record();
            if site.is_valid() {
                methylated.push(record.methylated());
                total.push(record.total());
            }
            else {
                methylated.push(0);
                total.push(0);
            }
            context.push(record.context());
        }

        Self {
            methylated: Array1::from_vec(methylated),
            total:      Array1::from_vec(total),
            context:    Array1::from_vec(context),
        }
    }
}

/// Ratio projection of a block: `methylated / total` for valid sites and
/// [`NO_RATIO`] for every filtered site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioBlock {
    ratio: Array1<RatioType>,
}

impl RatioBlock {
    getter_fn!(ratio, Array1<RatioType>);

    pub fn len(&self) -> usize {
        self.ratio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratio.is_empty()
    }

    /// Number of sites that passed the filter.
    pub fn n_valid(&self) -> usize {
        self.ratio
            .iter()
            .filter(|ratio| **ratio != NO_RATIO)
            .count()
    }

    pub fn into_array(self) -> Array1<RatioType> {
        self.ratio
    }
}

impl FromIterator<FilteredRecord> for RatioBlock {
    fn from_iter<I: IntoIterator<Item = FilteredRecord>>(iter: I) -> Self {
        let ratio = iter
            .into_iter()
            .map(|site| {
                if site.is_valid() {
                    let record = site.record();
                    record.methylated() as RatioType / record.total() as RatioType
                }
                else {
                    NO_RATIO
                }
            })
            .collect::<Vec<_>>();
        Self {
            ratio: Array1::from_vec(ratio),
        }
    }
}

/// Result of a fetch in the shape selected by [`FetchMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutput {
    Counts(CountsBlock),
    Ratio(RatioBlock),
}

impl FetchOutput {
    /// Projects filtered records into the shape selected by `mode`.
    pub fn collect<I: IntoIterator<Item = FilteredRecord>>(
        mode: FetchMode,
        sites: I,
    ) -> Self {
        match mode {
            FetchMode::Counts => FetchOutput::Counts(sites.into_iter().collect()),
            FetchMode::Ratio => FetchOutput::Ratio(sites.into_iter().collect()),
        }
    }

    pub fn mode(&self) -> FetchMode {
        match self {
            FetchOutput::Counts(_) => FetchMode::Counts,
            FetchOutput::Ratio(_) => FetchMode::Ratio,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FetchOutput::Counts(block) => block.len(),
            FetchOutput::Ratio(block) => block.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_counts(&self) -> Option<&CountsBlock> {
        match self {
            FetchOutput::Counts(block) => Some(block),
            FetchOutput::Ratio(_) => None,
        }
    }

    pub fn as_ratio(&self) -> Option<&RatioBlock> {
        match self {
            FetchOutput::Ratio(block) => Some(block),
            FetchOutput::Counts(_) => None,
        }
    }

    pub fn into_counts(self) -> Option<CountsBlock> {
        match self {
            FetchOutput::Counts(block) => Some(block),
            FetchOutput::Ratio(_) => None,
        }
    }

    pub fn into_ratio(self) -> Option<RatioBlock> {
        match self {
            FetchOutput::Ratio(block) => Some(block),
            FetchOutput::Counts(_) => None,
        }
    }
}

use serde::{
    Deserialize,
    Serialize,
};

use super::record::Record;
use super::typedef::CoverageBound;
use crate::error::{
    FetchError,
    Result,
};

/// Why a site was kept or dropped by a [`CoverageFilter`].
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug)]
pub enum SiteStatus {
    /// `totalCount` is the no-data sentinel.
    NoData,
    /// `totalCount` is zero, which has no defined ratio.
    ZeroCoverage,
    BelowMin,
    AboveMax,
    Valid,
}

impl SiteStatus {
    pub fn is_valid(self) -> bool {
        matches!(self, SiteStatus::Valid)
    }
}

/// Inclusive bounds on `totalCount` that a site must satisfy to be
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CoverageBounds")]
pub struct CoverageFilter {
    min_coverage: CoverageBound,
    max_coverage: CoverageBound,
}

impl Default for CoverageFilter {
    fn default() -> Self {
        Self {
            min_coverage: 0,
            max_coverage: CoverageBound::MAX,
        }
    }
}

/// Unvalidated form of [`CoverageFilter`] used during deserialization.
#[derive(Deserialize)]
struct CoverageBounds {
    #[serde(default)]
    min_coverage: CoverageBound,
    #[serde(default = "unbounded")]
    max_coverage: CoverageBound,
}

fn unbounded() -> CoverageBound {
    CoverageBound::MAX
}

impl TryFrom<CoverageBounds> for CoverageFilter {
    type Error = FetchError;

    fn try_from(value: CoverageBounds) -> Result<Self> {
        CoverageFilter::try_new(value.min_coverage, value.max_coverage)
    }
}

impl CoverageFilter {
    pub fn try_new(
        min_coverage: CoverageBound,
        max_coverage: CoverageBound,
    ) -> Result<Self> {
        if min_coverage > max_coverage {
            return Err(FetchError::invalid_parameter(
                "min_coverage",
                format!(
                    "minimum coverage {} exceeds maximum coverage {}",
                    min_coverage, max_coverage
                ),
            ));
        }
        Ok(Self {
            min_coverage,
            max_coverage,
        })
    }

    pub fn min_coverage(&self) -> CoverageBound {
        self.min_coverage
    }

    pub fn max_coverage(&self) -> CoverageBound {
        self.max_coverage
    }

    /// Classifies a record. The first matching rule wins: sentinel, zero
    /// coverage, below minimum, above maximum.
    pub fn classify(
        &self,
        record: &Record,
    ) -> SiteStatus {
        let total = CoverageBound::from(record.total());
        if record.is_no_data() {
            SiteStatus::NoData
        }
        else if total == 0 {
            SiteStatus::ZeroCoverage
        }
        else if total < self.min_coverage {
            SiteStatus::BelowMin
        }
        else if total > self.max_coverage {
            SiteStatus::AboveMax
        }
        else {
            SiteStatus::Valid
        }
    }

    pub fn apply(
        &self,
        record: Record,
    ) -> FilteredRecord {
        FilteredRecord {
            status: self.classify(&record),
            record,
        }
    }
}

/// A decoded record together with its filter verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredRecord {
    record: Record,
    status: SiteStatus,
}

impl FilteredRecord {
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn status(&self) -> SiteStatus {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::CoverageBound;
use crate::data_structs::{
    CoverageFilter,
    FetchMode,
    RecordLayout,
};
use crate::error::{
    FetchError,
    Result,
};
use crate::with_field_fn;

/// Parameters of one fetch: the window to read, the validity bounds and the
/// output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchRequest {
    /// Absolute byte offset of the first record.
    offset:      u64,
    /// Number of records to read.
    block_count: usize,
    filter:      CoverageFilter,
    mode:        FetchMode,
    layout:      RecordLayout,
}

impl FetchRequest {
    pub fn new(
        offset: u64,
        block_count: usize,
        filter: CoverageFilter,
        mode: FetchMode,
    ) -> Self {
        Self {
            offset,
            block_count,
            filter,
            mode,
            layout: RecordLayout::default(),
        }
    }

    /// Validates integer parameters received from a host environment.
    ///
    /// Negative values are rejected, as is a minimum coverage above the
    /// maximum. Coverage bounds beyond the `u32` range are clamped.
    pub fn try_from_raw(
        offset: i64,
        block_count: i64,
        min_coverage: i64,
        max_coverage: i64,
        mode: FetchMode,
    ) -> Result<Self> {
        let offset = u64::try_from(offset).map_err(|_| {
            FetchError::invalid_parameter(
                "offset",
                format!("byte offset must be non-negative, got {}", offset),
            )
        })?;
        let block_count = usize::try_from(block_count).map_err(|_| {
            FetchError::invalid_parameter(
                "block_count",
                format!("block count must be non-negative, got {}", block_count),
            )
        })?;
        let min_coverage = coverage_bound("min_coverage", min_coverage)?;
        let max_coverage = coverage_bound("max_coverage", max_coverage)?;

        Ok(Self::new(
            offset,
            block_count,
            CoverageFilter::try_new(min_coverage, max_coverage)?,
            mode,
        ))
    }

    with_field_fn!(offset, u64);
    with_field_fn!(block_count, usize);
    with_field_fn!(filter, CoverageFilter);
    with_field_fn!(mode, FetchMode);
    with_field_fn!(layout, RecordLayout);

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn filter(&self) -> CoverageFilter {
        self.filter
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Number of bytes the request covers, or `None` if it does not fit
    /// into `u64`.
    pub fn byte_len(&self) -> Option<u64> {
        (self.block_count as u64).checked_mul(self.layout.record_size() as u64)
    }
}

fn coverage_bound(
    name: &'static str,
    value: i64,
) -> Result<CoverageBound> {
    if value < 0 {
        return Err(FetchError::invalid_parameter(
            name,
            format!("coverage bound must be non-negative, got {}", value),
        ));
    }
    Ok(CoverageBound::try_from(value).unwrap_or(CoverageBound::MAX))
}

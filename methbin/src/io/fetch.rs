//! Path-based entry points. Each call opens its own file handle, which is
//! closed when the call returns, successfully or not.

use std::path::Path;

use super::reader::RecordReader;
use super::request::FetchRequest;
use crate::data_structs::typedef::CoverageBound;
use crate::data_structs::{
    CountsBlock,
    CoverageFilter,
    FetchMode,
    FetchOutput,
    RatioBlock,
};
use crate::error::Result;

/// Reads the window described by `request` from the file at `path`.
pub fn fetch<P: AsRef<Path>>(
    path: P,
    request: &FetchRequest,
) -> Result<FetchOutput> {
    RecordReader::open(path)?.fetch(request)
}

/// Reads `block_count` records at `offset` and returns filtered methylated
/// counts, filtered total counts and context codes.
pub fn fetch_counts<P: AsRef<Path>>(
    path: P,
    offset: u64,
    block_count: usize,
    min_coverage: CoverageBound,
    max_coverage: CoverageBound,
) -> Result<CountsBlock> {
    let filter = CoverageFilter::try_new(min_coverage, max_coverage)?;
    RecordReader::open(path)?.read_counts(offset, block_count, &filter)
}

/// Reads `block_count` records at `offset` and returns their methylation
/// ratios, `-1.0` for filtered sites.
pub fn fetch_ratios<P: AsRef<Path>>(
    path: P,
    offset: u64,
    block_count: usize,
    min_coverage: CoverageBound,
    max_coverage: CoverageBound,
) -> Result<RatioBlock> {
    let filter = CoverageFilter::try_new(min_coverage, max_coverage)?;
    RecordReader::open(path)?.read_ratios(offset, block_count, &filter)
}

/// Host-facing form of [`fetch`] taking untyped integers, as received from
/// an interpreter binding.
pub fn fetch_raw<P: AsRef<Path>>(
    path: P,
    offset: i64,
    block_count: i64,
    min_coverage: i64,
    max_coverage: i64,
    mode: FetchMode,
) -> Result<FetchOutput> {
    let request =
        FetchRequest::try_from_raw(offset, block_count, min_coverage, max_coverage, mode)?;
    fetch(path, &request)
}

//! # methbin
//!
//! `methbin` gives random access to per-position methylation coverage stored
//! in flat binary record files. Each record holds the methylated read count,
//! the total read count and a sequence-context code of one genomic
//! position; records are packed back to back without header or delimiter,
//! so the records of any genomic window are a contiguous byte range.
//!
//! Given a byte offset and a number of records, the crate reads the window,
//! drops the sites without usable data and returns either
//!
//! * the **counts** projection ([`CountsBlock`]): filtered methylated
//!   counts, filtered total counts and raw context codes, or
//! * the **ratio** projection ([`RatioBlock`]): `methylated / total` per
//!   site and `-1.0` where the site was filtered.
//!
//! A site is filtered when its total count is the `65535` no-data sentinel,
//! is zero, or lies outside the inclusive `[min_coverage, max_coverage]`
//! range. Outputs are `ndarray` arrays index-aligned with the records on
//! disk.
//!
//! ## Structure
//!
//! * [`data_structs`]: records and their byte layout, the coverage filter,
//!   output blocks and block statistics ([`BlockStats`]).
//! * [`io`]: [`RecordReader`] over any `Read + Seek` source and the
//!   path-based [`fetch`] entry points.
//! * [`error`]: the [`FetchError`] taxonomy. Failed seeks and short reads
//!   are always reported, never replaced by partially filled output.
//!
//! ## Usage
//!
//! ```no_run
//! use methbin::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Records 100..110 of a file in the default 6-byte layout
//!     let record_size = RecordLayout::WithContext.record_size() as u64;
//!     let counts = fetch_counts("sample.bin", 100 * record_size, 10, 5, 200)?;
//!     for (methylated, total, context) in counts.iter() {
//!         println!("{}\t{}\t{}", methylated, total, context);
//!     }
//!
//!     let request = FetchRequest::default()
//!         .with_offset(100 * record_size)
//!         .with_block_count(10)
//!         .with_filter(CoverageFilter::try_new(5, 200)?)
//!         .with_mode(FetchMode::Ratio);
//!     if let Some(ratios) = fetch("sample.bin", &request)?.as_ratio() {
//!         println!("{} of {} sites passed", ratios.n_valid(), ratios.len());
//!     }
//!     Ok(())
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod utils;

pub use crate::data_structs::{
    BlockStats,
    Context,
    CountsBlock,
    CoverageFilter,
    FetchMode,
    FetchOutput,
    FilteredRecord,
    RatioBlock,
    Record,
    RecordLayout,
    SiteStatus,
};
pub use crate::error::{
    FetchError,
    Result,
};
pub use crate::io::{
    fetch,
    fetch_counts,
    fetch_ratios,
    fetch_raw,
    FetchRequest,
    RecordReader,
};

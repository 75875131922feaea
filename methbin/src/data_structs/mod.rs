//! Core data structures of the crate.
//!
//! - [`Record`] and [`RecordLayout`]: one on-disk position and the byte
//!   layout shared by writer and reader.
//! - [`CoverageFilter`], [`SiteStatus`] and [`FilteredRecord`]: the
//!   validity rules applied to every decoded record.
//! - [`CountsBlock`], [`RatioBlock`] and [`FetchOutput`]: the two output
//!   projections of a block, backed by `ndarray` arrays.
//! - [`BlockStats`]: methylation and coverage summaries of counts blocks.
//! - [`Context`] and [`FetchMode`] enumerations.
//! - [`typedef`]: type aliases and reserved values (sentinels).

mod block;
mod enums;
mod filter;
mod methstats;
mod record;
pub mod typedef;


pub use block::{
    CountsBlock,
    FetchOutput,
    RatioBlock,
};
pub use enums::{
    Context,
    FetchMode,
};
pub use filter::{
    CoverageFilter,
    FilteredRecord,
    SiteStatus,
};
pub use methstats::BlockStats;
pub use record::{
    Record,
    RecordLayout,
};

pub use crate::data_structs::typedef::*;
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
pub use crate::error::FetchError;
pub use crate::io::{
    fetch,
    fetch_counts,
    fetch_ratios,
    fetch_raw,
    FetchRequest,
    RecordReader,
};

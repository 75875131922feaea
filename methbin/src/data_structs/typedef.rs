/// Methylated and total read counts as stored on disk.
pub type CountType = u16;
/// Opaque sequence-context code as stored on disk.
pub type ContextCode = u8;
/// Per-site methylation ratio produced by the ratio projection.
pub type RatioType = f64;
/// Inclusive coverage bound supplied by the caller.
pub type CoverageBound = u32;

/// `totalCount` value reserved for positions without data.
pub const NO_DATA: CountType = CountType::MAX;
/// Ratio emitted for every filtered-out site.
pub const NO_RATIO: RatioType = -1.0;
/// Context code reported for layouts that do not store a context.
pub const UNKNOWN_CONTEXT: ContextCode = ContextCode::MAX;

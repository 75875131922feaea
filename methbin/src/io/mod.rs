//! Reading record files.
//!
//! [`RecordReader`] implements the read/seek/decode/filter pipeline over any
//! `Read + Seek` source. The free functions ([`fetch`], [`fetch_counts`],
//! [`fetch_ratios`], [`fetch_raw`]) open a file per call and delegate to it.

mod fetch;
mod reader;
mod request;

#[cfg(test)]
mod tests;

pub use fetch::{
    fetch,
    fetch_counts,
    fetch_ratios,
    fetch_raw,
};
pub use reader::RecordReader;
pub use request::FetchRequest;

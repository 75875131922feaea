//! Error taxonomy of the record reader.
//!
//! Every failure is returned to the caller as a [`FetchError`]; the reader
//! never continues with a partially filled buffer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The file is missing, unreadable or could not be opened.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requested offset lies beyond the end of the source, or the seek
    /// primitive failed.
    #[error("cannot seek to byte offset {offset} (source length {file_len}): {source}")]
    Seek {
        offset:   u64,
        file_len: u64,
        #[source]
        source:   io::Error,
    },

    /// Fewer whole records remain after the offset than were requested.
    #[error(
        "requested {requested} records at byte offset {offset}, but only {available} are \
         available"
    )]
    TruncatedRead {
        offset:    u64,
        requested: usize,
        available: usize,
    },

    /// A call parameter is out of its domain.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        name:    &'static str,
        message: String,
    },

    /// The read primitive failed for a reason other than end of file.
    #[error("read failed at byte offset {offset}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn seek_past_end(
        offset: u64,
        file_len: u64,
    ) -> Self {
        Self::Seek {
            offset,
            file_len,
            source: io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "offset is past the end of the source",
            ),
        }
    }
}

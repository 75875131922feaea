use std::fs::File;
use std::io::{
    self,
    Read,
    Seek,
    SeekFrom,
};
use std::path::Path;

use log::{
    debug,
    warn,
};

use super::request::FetchRequest;
use crate::data_structs::{
    CountsBlock,
    CoverageFilter,
    FetchOutput,
    FilteredRecord,
    RatioBlock,
    Record,
    RecordLayout,
};
use crate::error::{
    FetchError,
    Result,
};

/// Reads windows of fixed-size records from a seekable source.
///
/// Every read determines the source length, seeks to the requested offset
/// and reads the whole window into one buffer before decoding it. A window
/// that does not fit into the source is an error; the reader never returns
/// partially filled blocks.
pub struct RecordReader<R: Read + Seek> {
    handle: R,
    layout: RecordLayout,
}

impl RecordReader<File> {
    /// Opens a record file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_access = |source: io::Error| {
            FetchError::FileAccess {
                path: path.to_path_buf(),
                source,
            }
        };

        let file = File::open(path).map_err(file_access)?;
        let metadata = file.metadata().map_err(file_access)?;
        if !metadata.is_file() {
            return Err(file_access(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        debug!("Opened {} ({} bytes)", path.display(), metadata.len());
        Ok(Self::new(file))
    }
}

impl<R: Read + Seek> RecordReader<R> {
    pub fn new(handle: R) -> Self {
        Self {
            handle,
            layout: RecordLayout::default(),
        }
    }

    pub fn with_layout(
        mut self,
        layout: RecordLayout,
    ) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Length of the underlying source in bytes.
    pub fn byte_len(&mut self) -> io::Result<u64> {
        self.handle.seek(SeekFrom::End(0))
    }

    /// Reads `block_count` records starting at byte `offset`.
    pub fn read_records(
        &mut self,
        offset: u64,
        block_count: usize,
    ) -> Result<Vec<Record>> {
        self.read_block(offset, block_count, self.layout)
    }

    /// Reads `block_count` records and classifies each with `filter`.
    pub fn read_filtered(
        &mut self,
        offset: u64,
        block_count: usize,
        filter: &CoverageFilter,
    ) -> Result<Vec<FilteredRecord>> {
        Ok(self
            .read_records(offset, block_count)?
            .into_iter()
            .map(|record| filter.apply(record))
            .collect())
    }

    /// Reads a window in the counts projection.
    pub fn read_counts(
        &mut self,
        offset: u64,
        block_count: usize,
        filter: &CoverageFilter,
    ) -> Result<CountsBlock> {
        Ok(self
            .read_filtered(offset, block_count, filter)?
            .into_iter()
            .collect())
    }

    /// Reads a window in the ratio projection.
    pub fn read_ratios(
        &mut self,
        offset: u64,
        block_count: usize,
        filter: &CoverageFilter,
    ) -> Result<RatioBlock> {
        Ok(self
            .read_filtered(offset, block_count, filter)?
            .into_iter()
            .collect())
    }

    /// Executes a request. The layout of the request takes precedence over
    /// the layout of the reader.
    pub fn fetch(
        &mut self,
        request: &FetchRequest,
    ) -> Result<FetchOutput> {
        let filter = request.filter();
        let records = self.read_block(request.offset(), request.block_count(), request.layout())?;
        let output = FetchOutput::collect(
            request.mode(),
            records.into_iter().map(|record| filter.apply(record)),
        );

        debug!(
            "Fetched {} sites at offset {} in {} mode",
            output.len(),
            request.offset(),
            output.mode()
        );
        Ok(output)
    }

    fn read_block(
        &mut self,
        offset: u64,
        block_count: usize,
        layout: RecordLayout,
    ) -> Result<Vec<Record>> {
        let record_size = layout.record_size();

        let file_len = self.byte_len().map_err(|source| {
            FetchError::Seek {
                offset,
                file_len: 0,
                source,
            }
        })?;
        if offset > file_len {
            return Err(FetchError::seek_past_end(offset, file_len));
        }
        if offset % record_size as u64 != 0 {
            warn!(
                "Offset {} is not a multiple of the record size {}",
                offset, record_size
            );
        }
        self.handle
            .seek(SeekFrom::Start(offset))
            .map_err(|source| {
                FetchError::Seek {
                    offset,
                    file_len,
                    source,
                }
            })?;

        let available = usize::try_from((file_len - offset) / record_size as u64)
            .unwrap_or(usize::MAX);
        if block_count > available {
            return Err(FetchError::TruncatedRead {
                offset,
                requested: block_count,
                available,
            });
        }

        let n_bytes = block_count.checked_mul(record_size).ok_or_else(|| {
            FetchError::invalid_parameter(
                "block_count",
                format!("{} records exceed the addressable size", block_count),
            )
        })?;
        let mut buffer = Vec::with_capacity(n_bytes);
        (&mut self.handle)
            .take(n_bytes as u64)
            .read_to_end(&mut buffer)
            .map_err(|source| FetchError::Read { offset, source })?;
        if buffer.len() < n_bytes {
            return Err(FetchError::TruncatedRead {
                offset,
                requested: block_count,
                available: buffer.len() / record_size,
            });
        }

        debug!(
            "Read {} records ({} bytes) at offset {}",
            block_count, n_bytes, offset
        );
        Ok(layout.decode_all(&buffer).collect())
    }
}

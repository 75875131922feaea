use std::io::{
    self,
    Write,
};

use byteorder::{
    ByteOrder,
    LittleEndian,
    WriteBytesExt,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::enums::Context;
use super::typedef::{
    ContextCode,
    CountType,
    NO_DATA,
    UNKNOWN_CONTEXT,
};

/// One genomic position as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Record {
    methylated: CountType,
    total:      CountType,
    context:    ContextCode,
}

impl Record {
    pub fn new(
        methylated: CountType,
        total: CountType,
        context: ContextCode,
    ) -> Self {
        Self {
            methylated,
            total,
            context,
        }
    }

    /// Record written by the indexers for positions without any reads.
    pub fn no_data(context: ContextCode) -> Self {
        Self::new(NO_DATA, NO_DATA, context)
    }

    pub fn methylated(&self) -> CountType {
        self.methylated
    }

    pub fn total(&self) -> CountType {
        self.total
    }

    pub fn context(&self) -> ContextCode {
        self.context
    }

    /// `true` if `totalCount` carries the no-data sentinel.
    pub fn is_no_data(&self) -> bool {
        self.total == NO_DATA
    }

    /// Named context for the stored code, if it has one.
    pub fn context_kind(&self) -> Option<Context> {
        Context::from_code(self.context)
    }
}

/// Byte layout of a record file. Integers are little-endian and records
/// follow each other without header, footer or delimiter.
///
/// | layout        | size | bytes                                        |
/// |---------------|------|----------------------------------------------|
/// | `WithContext` | 6    | `methylated:u16`, `total:u16`, `context:u8`, pad |
/// | `CountsOnly`  | 4    | `methylated:u16`, `total:u16`                |
///
/// `WithContext` reproduces the natural alignment of the writer's
/// `{u16, u16, u8}` struct, so its trailing byte is padding. Records in the
/// `CountsOnly` layout decode with [`UNKNOWN_CONTEXT`].
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    #[default]
    WithContext,
    CountsOnly,
}

impl RecordLayout {
    /// Width of one record in bytes.
    pub const fn record_size(self) -> usize {
        match self {
            RecordLayout::WithContext => 6,
            RecordLayout::CountsOnly => 4,
        }
    }

    /// Decodes the first record of `bytes`, or `None` if the slice is
    /// shorter than one record.
    pub fn decode(
        self,
        bytes: &[u8],
    ) -> Option<Record> {
        if bytes.len() < self.record_size() {
            return None;
        }
        Some(self.decode_unchecked(bytes))
    }

    /// Decodes every whole record of `buffer` in order. A trailing partial
    /// record is ignored.
    pub fn decode_all(
        self,
        buffer: &[u8],
    ) -> impl Iterator<Item = Record> + '_ {
        buffer
            .chunks_exact(self.record_size())
            .map(move |chunk| self.decode_unchecked(chunk))
    }

    /// Writes `record` in this layout.
    pub fn encode<W: Write>(
        self,
        record: &Record,
        sink: &mut W,
    ) -> io::Result<()> {
        sink.write_u16::<LittleEndian>(record.methylated)?;
        sink.write_u16::<LittleEndian>(record.total)?;
        if let RecordLayout::WithContext = self {
            sink.write_u8(record.context)?;
            sink.write_u8(0)?;
        }
        Ok(())
    }

    fn decode_unchecked(
        self,
        bytes: &[u8],
    ) -> Record {
        let methylated = LittleEndian::read_u16(&bytes[0..2]);
        let total = LittleEndian::read_u16(&bytes[2..4]);
        let context = match self {
            RecordLayout::WithContext => bytes[4],
            RecordLayout::CountsOnly => UNKNOWN_CONTEXT,
        };
        Record::new(methylated, total, context)
    }
}

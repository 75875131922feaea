use std::io::{
    self,
    Cursor,
    Read,
    Seek,
    SeekFrom,
};

use assert_approx_eq::assert_approx_eq;
use rstest::{
    fixture,
    rstest,
};

use crate::data_structs::typedef::*;
use crate::prelude::*;

fn encode(
    records: &[Record],
    layout: RecordLayout,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(records.len() * layout.record_size());
    for record in records {
        layout.encode(record, &mut buf).unwrap();
    }
    buf
}

#[fixture]
fn scenario() -> Vec<Record> {
    vec![
        Record::new(10, 20, 1),
        Record::no_data(2),
        Record::new(5, 3, 0),
    ]
}

#[fixture]
fn reader(scenario: Vec<Record>) -> RecordReader<Cursor<Vec<u8>>> {
    let _ = pretty_env_logger::try_init();
    RecordReader::new(Cursor::new(encode(&scenario, RecordLayout::WithContext)))
}

/// Source that can be told to fail its reads, its absolute seeks or its
/// seeks relative to the end.
struct FaultySource {
    inner:      Cursor<Vec<u8>>,
    fail_read:  bool,
    fail_start: bool,
    fail_end:   bool,
}

impl Read for FaultySource {
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> io::Result<usize> {
        if self.fail_read {
            return Err(io::Error::new(io::ErrorKind::Other, "device error"));
        }
        self.inner.read(buf)
    }
}

impl Seek for FaultySource {
    fn seek(
        &mut self,
        pos: SeekFrom,
    ) -> io::Result<u64> {
        if self.fail_start && matches!(pos, SeekFrom::Start(_)) {
            return Err(io::Error::new(io::ErrorKind::Other, "seek rejected"));
        }
        if self.fail_end && matches!(pos, SeekFrom::End(_)) {
            return Err(io::Error::new(io::ErrorKind::Other, "length unavailable"));
        }
        self.inner.seek(pos)
    }
}

#[rstest]
fn test_counts_scenario(mut reader: RecordReader<Cursor<Vec<u8>>>) {
    let filter = CoverageFilter::try_new(5, 50).unwrap();
    let block = reader.read_counts(0, 3, &filter).unwrap();
    assert_eq!(block.methylated().to_vec(), vec![10, 0, 0]);
    assert_eq!(block.total().to_vec(), vec![20, 0, 0]);
    assert_eq!(block.context().to_vec(), vec![1, 2, 0]);
}

#[rstest]
fn test_ratio_scenario(mut reader: RecordReader<Cursor<Vec<u8>>>) {
    let filter = CoverageFilter::try_new(5, 50).unwrap();
    let block = reader.read_ratios(0, 3, &filter).unwrap();
    assert_eq!(block.len(), 3);
    assert_approx_eq!(block.ratio()[0], 0.5);
    assert_eq!(block.ratio()[1], NO_RATIO);
    assert_eq!(block.ratio()[2], NO_RATIO);
}

#[rstest]
fn test_fetch_request_modes(mut reader: RecordReader<Cursor<Vec<u8>>>) {
    let request = FetchRequest::new(
        0,
        3,
        CoverageFilter::try_new(5, 50).unwrap(),
        FetchMode::Counts,
    );
    let counts = reader.fetch(&request).unwrap();
    assert_eq!(counts.mode(), FetchMode::Counts);
    assert_eq!(counts.len(), 3);

    let ratios = reader
        .fetch(&request.with_mode(FetchMode::Ratio))
        .unwrap();
    assert_eq!(ratios.mode(), FetchMode::Ratio);
    assert_eq!(ratios.as_ratio().unwrap().n_valid(), 1);
    assert_eq!(counts.as_counts().unwrap().ratios(), *ratios.as_ratio().unwrap());
}

#[rstest]
fn test_repeated_fetch_is_identical(mut reader: RecordReader<Cursor<Vec<u8>>>) {
    let request = FetchRequest::default()
        .with_block_count(3)
        .with_mode(FetchMode::Ratio);
    let first = reader.fetch(&request).unwrap();
    let second = reader.fetch(&request).unwrap();
    assert_eq!(first, second);
}

#[rstest]
fn test_read_window(mut reader: RecordReader<Cursor<Vec<u8>>>) {
    let records = reader.read_records(6, 2).unwrap();
    assert_eq!(records, vec![Record::no_data(2), Record::new(5, 3, 0)]);

    let sites = reader
        .read_filtered(12, 1, &CoverageFilter::default())
        .unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].status(), SiteStatus::Valid);
}

#[rstest]
#[case::start(0)]
#[case::middle(6)]
#[case::end(18)]
fn test_zero_blocks(
    mut reader: RecordReader<Cursor<Vec<u8>>>,
    #[case] offset: u64,
) {
    let filter = CoverageFilter::default();
    assert!(reader
        .read_counts(offset, 0, &filter)
        .unwrap()
        .is_empty());
    assert!(reader
        .read_ratios(offset, 0, &filter)
        .unwrap()
        .is_empty());
}

#[rstest]
fn test_offset_past_end(mut reader: RecordReader<Cursor<Vec<u8>>>) {
    let err = reader.read_records(24, 0).unwrap_err();
    assert!(matches!(err, FetchError::Seek {
        offset: 24,
        file_len: 18,
        ..
    }));
}

#[rstest]
#[case::whole_file(0, 4, 3)]
#[case::from_middle(12, 2, 1)]
#[case::at_end(18, 1, 0)]
fn test_truncated_read(
    mut reader: RecordReader<Cursor<Vec<u8>>>,
    #[case] offset: u64,
    #[case] requested: usize,
    #[case] expected_available: usize,
) {
    match reader.read_records(offset, requested) {
        Err(FetchError::TruncatedRead {
            offset: err_offset,
            requested: err_requested,
            available,
        }) => {
            assert_eq!(err_offset, offset);
            assert_eq!(err_requested, requested);
            assert_eq!(available, expected_available);
        },
        other => panic!("expected a truncated read, got {:?}", other),
    }
}

#[rstest]
fn test_partial_trailing_record(scenario: Vec<Record>) {
    let mut bytes = encode(&scenario, RecordLayout::WithContext);
    bytes.extend_from_slice(&[1, 0, 2]);
    let mut reader = RecordReader::new(Cursor::new(bytes));

    assert_eq!(reader.read_records(0, 3).unwrap(), scenario);
    assert!(matches!(
        reader.read_records(0, 4),
        Err(FetchError::TruncatedRead { available: 3, .. })
    ));
}

#[test]
fn test_misaligned_offset_is_read() {
    let _ = pretty_env_logger::try_init();
    let mut bytes = vec![0xAA];
    bytes.extend(encode(&[Record::new(1, 2, 0)], RecordLayout::WithContext));
    let mut reader = RecordReader::new(Cursor::new(bytes));

    assert_eq!(reader.read_records(1, 1).unwrap(), vec![Record::new(1, 2, 0)]);
}

#[rstest]
fn test_counts_only_layout(scenario: Vec<Record>) {
    let bytes = encode(&scenario, RecordLayout::CountsOnly);
    assert_eq!(bytes.len(), 12);

    let mut reader = RecordReader::new(Cursor::new(bytes)).with_layout(RecordLayout::CountsOnly);
    assert_eq!(reader.layout(), RecordLayout::CountsOnly);
    let block = reader
        .read_counts(4, 2, &CoverageFilter::default())
        .unwrap();
    assert_eq!(block.total().to_vec(), vec![0, 3]);
    assert_eq!(block.context().to_vec(), vec![UNKNOWN_CONTEXT; 2]);
}

#[rstest]
fn test_request_layout_overrides_reader(scenario: Vec<Record>) {
    let bytes = encode(&scenario, RecordLayout::CountsOnly);
    let mut reader = RecordReader::new(Cursor::new(bytes));
    let request = FetchRequest::default()
        .with_block_count(3)
        .with_layout(RecordLayout::CountsOnly);

    let counts = reader.fetch(&request).unwrap().into_counts().unwrap();
    assert_eq!(counts.methylated().to_vec(), vec![10, 0, 5]);
    assert_eq!(counts.total().to_vec(), vec![20, 0, 3]);
}

#[rstest]
fn test_read_failure(scenario: Vec<Record>) {
    let mut reader = RecordReader::new(FaultySource {
        inner:      Cursor::new(encode(&scenario, RecordLayout::WithContext)),
        fail_read:  true,
        fail_start: false,
        fail_end:   false,
    });
    assert!(matches!(
        reader.read_records(0, 1),
        Err(FetchError::Read { offset: 0, .. })
    ));
}

#[rstest]
fn test_seek_failure(scenario: Vec<Record>) {
    let mut reader = RecordReader::new(FaultySource {
        inner:      Cursor::new(encode(&scenario, RecordLayout::WithContext)),
        fail_read:  false,
        fail_start: true,
        fail_end:   false,
    });
    assert!(matches!(
        reader.read_records(6, 1),
        Err(FetchError::Seek {
            offset: 6,
            file_len: 18,
            ..
        })
    ));
}

#[rstest]
fn test_length_failure(scenario: Vec<Record>) {
    let mut reader = RecordReader::new(FaultySource {
        inner:      Cursor::new(encode(&scenario, RecordLayout::WithContext)),
        fail_read:  false,
        fail_start: false,
        fail_end:   true,
    });
    assert!(reader.byte_len().is_err());
    assert!(matches!(
        reader.read_records(6, 1),
        Err(FetchError::Seek {
            offset: 6,
            file_len: 0,
            ..
        })
    ));
}

mod request_tests {
    use crate::data_structs::typedef::CoverageBound;
    use crate::prelude::*;

    #[test]
    fn test_try_from_raw() {
        let request = FetchRequest::try_from_raw(12, 3, 5, 50, FetchMode::Ratio).unwrap();
        assert_eq!(request.offset(), 12);
        assert_eq!(request.block_count(), 3);
        assert_eq!(request.filter(), CoverageFilter::try_new(5, 50).unwrap());
        assert_eq!(request.mode(), FetchMode::Ratio);
        assert_eq!(request.layout(), RecordLayout::WithContext);
        assert_eq!(request.byte_len(), Some(18));
    }

    #[test]
    fn test_try_from_raw_rejects() {
        let name_of = |res: Result<FetchRequest, FetchError>| {
            match res {
                Err(FetchError::InvalidParameter { name, .. }) => name,
                other => panic!("expected an invalid parameter, got {:?}", other),
            }
        };
        assert_eq!(
            name_of(FetchRequest::try_from_raw(0, -1, 0, 10, FetchMode::Counts)),
            "block_count"
        );
        assert_eq!(
            name_of(FetchRequest::try_from_raw(-6, 1, 0, 10, FetchMode::Counts)),
            "offset"
        );
        assert_eq!(
            name_of(FetchRequest::try_from_raw(0, 1, 11, 10, FetchMode::Counts)),
            "min_coverage"
        );
        assert_eq!(
            name_of(FetchRequest::try_from_raw(0, 1, -1, 10, FetchMode::Counts)),
            "min_coverage"
        );
        assert_eq!(
            name_of(FetchRequest::try_from_raw(0, 1, 0, -1, FetchMode::Counts)),
            "max_coverage"
        );
    }

    #[test]
    fn test_try_from_raw_clamps_max() {
        let request =
            FetchRequest::try_from_raw(0, 1, 0, i64::MAX, FetchMode::Counts).unwrap();
        assert_eq!(request.filter().max_coverage(), CoverageBound::MAX);
    }

    #[test]
    fn test_byte_len_overflow() {
        let request: FetchRequest =
            serde_json::from_str(&format!(r#"{{"block_count": {}}}"#, usize::MAX)).unwrap();
        assert_eq!(request.block_count(), usize::MAX);
        assert_eq!(request.byte_len(), None);
        assert_eq!(
            request
                .with_block_count(1_000)
                .with_layout(RecordLayout::CountsOnly)
                .byte_len(),
            Some(4_000)
        );
    }

    #[test]
    fn test_request_serde() {
        let request: FetchRequest =
            serde_json::from_str(r#"{"offset": 12, "block_count": 3, "mode": "ratio"}"#).unwrap();
        assert_eq!(
            request,
            FetchRequest::default()
                .with_offset(12)
                .with_block_count(3)
                .with_mode(FetchMode::Ratio)
        );

        let request: FetchRequest = serde_json::from_str(
            r#"{"filter": {"min_coverage": 2, "max_coverage": 9}, "layout": "counts_only"}"#,
        )
        .unwrap();
        assert_eq!(request.filter(), CoverageFilter::try_new(2, 9).unwrap());
        assert_eq!(request.layout(), RecordLayout::CountsOnly);

        assert!(serde_json::from_str::<FetchRequest>(
            r#"{"filter": {"min_coverage": 9, "max_coverage": 2}}"#
        )
        .is_err());

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(serde_json::from_str::<FetchRequest>(&json).unwrap(), request);
    }
}

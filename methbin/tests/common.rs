#![allow(dead_code)]

use std::io::Write;

use methbin::data_structs::typedef::CountType;
use methbin::{
    Record,
    RecordLayout,
};
use rand::{
    Rng,
    SeedableRng,
};
use rand_chacha::ChaCha8Rng;
use tempfile::NamedTempFile;

/// Record file written to a temporary location, together with the records
/// it contains.
pub struct DemoRecordFile {
    pub records: Vec<Record>,
    pub layout:  RecordLayout,
    pub file:    NamedTempFile,
}

impl DemoRecordFile {
    pub fn record_offset(
        &self,
        index: usize,
    ) -> u64 {
        (index * self.layout.record_size()) as u64
    }
}

/// Generates seeded random record files.
pub struct DemoRecordBuilder<R: Rng> {
    rng:           R,
    n_records:     usize,
    no_data_share: f64,
    max_coverage:  CountType,
}

impl DemoRecordBuilder<ChaCha8Rng> {
    pub fn new(
        n_records: usize,
        no_data_share: f64,
        max_coverage: CountType,
        seed: u64,
    ) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            n_records,
            no_data_share,
            max_coverage,
        }
    }
}

impl<R: Rng> DemoRecordBuilder<R> {
    pub fn generate(&mut self) -> Vec<Record> {
        (0..self.n_records)
            .map(|_| {
                let context = self.rng.gen_range(0..3u8);
                if self.rng.gen_bool(self.no_data_share) {
                    Record::no_data(context)
                }
                else {
                    let total = self.rng.gen_range(0..=self.max_coverage);
                    let methylated = self.rng.gen_range(0..=total);
                    Record::new(methylated, total, context)
                }
            })
            .collect()
    }

    pub fn write(
        &mut self,
        layout: RecordLayout,
    ) -> anyhow::Result<DemoRecordFile> {
        let records = self.generate();
        let file = write_records(&records, layout)?;
        Ok(DemoRecordFile {
            records,
            layout,
            file,
        })
    }
}

pub fn write_records(
    records: &[Record],
    layout: RecordLayout,
) -> anyhow::Result<NamedTempFile> {
    let mut buf = Vec::with_capacity(records.len() * layout.record_size());
    for record in records {
        layout.encode(record, &mut buf)?;
    }
    let mut file = NamedTempFile::new()?;
    file.write_all(&buf)?;
    file.flush()?;
    Ok(file)
}

pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

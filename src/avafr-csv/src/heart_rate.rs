use std::{
    fs::File,
    path::{Path, PathBuf},
};

use avafr_types::HeartRateSample;
use csv::StringRecord;

use crate::{
    CsvError,
    helpers::{parse_date_time, parse_user_id},
    table::{HeaderMap, open_reader},
};

pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Streams a `heartrate_seconds` export in fixed-size chunks so the whole
/// file never has to be held in memory.
pub struct HeartRateReader {
    path: PathBuf,
    reader: csv::Reader<File>,
    record: StringRecord,
    chunk_size: usize,
    id: usize,
    time: usize,
    value: usize,
    line: usize,
    rows_read: usize,
    skipped: usize,
    finished: bool,
}

impl HeartRateReader {
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self, CsvError> {
        let path = path.as_ref();
        let mut reader = open_reader(path)?;
        let headers = HeaderMap::read(&mut reader, path)?;

        Ok(Self {
            id: headers.require(path, "Id")?,
            time: headers.require(path, "Time")?,
            value: headers.require(path, "Value")?,
            path: path.to_path_buf(),
            reader,
            record: StringRecord::new(),
            chunk_size: chunk_size.max(1),
            line: 1,
            rows_read: 0,
            skipped: 0,
            finished: false,
        })
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn parse_record(&self) -> Result<HeartRateSample, String> {
        let field = |idx: usize, name: &'static str| {
            self.record
                .get(idx)
                .ok_or_else(|| format!("missing field `{name}`"))
        };

        let id = field(self.id, "Id")?;
        let time = field(self.time, "Time")?;
        let value = field(self.value, "Value")?;

        Ok(HeartRateSample {
            user_id: parse_user_id(id).ok_or_else(|| format!("invalid Id `{id}`"))?,
            time: parse_date_time(time).ok_or_else(|| format!("invalid Time `{time}`"))?,
            value: value
                .parse()
                .map_err(|_| format!("invalid Value `{value}`"))?,
        })
    }
}

impl Iterator for HeartRateReader {
    type Item = Vec<HeartRateSample>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::with_capacity(self.chunk_size.min(DEFAULT_CHUNK_SIZE));

        // a chunk of only malformed rows is not the end of the file
        while chunk.len() < self.chunk_size && !self.finished {
            self.line += 1;
            match self.reader.read_record(&mut self.record) {
                Ok(false) => self.finished = true,
                Ok(true) => {
                    self.rows_read += 1;
                    match self.parse_record() {
                        Ok(sample) => chunk.push(sample),
                        Err(message) => {
                            warn!("{}:{}: skipping row: {}", self.path.display(), self.line, message);
                            self.skipped += 1;
                        }
                    }
                }
                Err(error) => {
                    self.rows_read += 1;
                    warn!("{}:{}: skipping row: {}", self.path.display(), self.line, error);
                    self.skipped += 1;
                    if error.is_io_error() {
                        self.finished = true;
                    }
                }
            }
        }

        (!chunk.is_empty()).then_some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::test_files::csv_file;

    const SAMPLES: &str = "Id,Time,Value\n\
        2022484408,4/12/2016 7:21:00 AM,97\n\
        2022484408,4/12/2016 7:21:05 AM,102\n\
        2022484408,4/12/2016 7:21:10 AM,105\n\
        2022484408,4/12/2016 7:21:20 AM,103\n\
        2022484408,4/12/2016 7:21:25 AM,101\n";

    #[test]
    fn yields_fixed_size_chunks() {
        let file = csv_file(SAMPLES);
        let reader = HeartRateReader::open(file.path(), 2).unwrap();

        let sizes = reader.map(|chunk| chunk.len()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn parses_twelve_hour_time() {
        let file = csv_file(SAMPLES);
        let mut reader = HeartRateReader::open(file.path(), DEFAULT_CHUNK_SIZE).unwrap();

        let chunk = reader.next().unwrap();
        assert_eq!(chunk.len(), 5);
        assert_eq!(chunk[0].value, 97);
        assert_eq!(chunk[0].time.to_string(), "2016-04-12 07:21:00");
        assert!(reader.next().is_none());
    }

    #[test]
    fn bad_rows_do_not_end_the_stream() {
        let file = csv_file(
            "Id,Time,Value\n\
             1,4/12/2016 1:00:00 AM,60\n\
             1,4/12/2016 1:00:05 AM,sixty\n\
             1,someday,60\n\
             1,4/12/2016 1:00:15 AM,58\n",
        );
        let mut reader = HeartRateReader::open(file.path(), 10).unwrap();

        let chunk = reader.next().unwrap();
        assert_eq!(chunk.iter().map(|s| s.value).collect::<Vec<_>>(), vec![60, 58]);
        assert_eq!(reader.rows_read(), 4);
        assert_eq!(reader.skipped(), 2);

        let file = csv_file(
            "Id,Time,Value\n\
             1,4/12/2016 1:00:00 AM,60\n\
             1,4/12/2016 1:00:05 AM,sixty\n\
             1,4/12/2016 1:00:15 AM,58\n",
        );
        let reader = HeartRateReader::open(file.path(), 1).unwrap();
        assert_eq!(reader.flatten().map(|s| s.value).collect::<Vec<_>>(), vec![60, 58]);
    }

    #[test]
    fn any_chunk_size_yields_every_sample_in_order() {
        let mut rng = rand::rng();
        let mut contents = String::from("Id,Time,Value\n");
        let mut expected = Vec::new();
        for minute in 0..200 {
            let value = rng.random_range(40..180u16);
            contents.push_str(&format!("7,4/12/2016 {}:{:02}:00,{}\n", minute / 60 + 1, minute % 60, value));
            expected.push(value);
        }
        let file = csv_file(&contents);

        for _ in 0..10 {
            let chunk_size = rng.random_range(1..=250);
            let chunks = HeartRateReader::open(file.path(), chunk_size)
                .unwrap()
                .collect::<Vec<_>>();

            assert!(chunks.iter().all(|c| c.len() <= chunk_size));
            let values = chunks.concat().iter().map(|s| s.value).collect::<Vec<_>>();
            assert_eq!(values, expected, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn zero_chunk_size_still_progresses() {
        let file = csv_file(SAMPLES);
        let reader = HeartRateReader::open(file.path(), 0).unwrap();
        assert_eq!(reader.count(), 5);
    }
}

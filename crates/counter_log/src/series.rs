use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::{classify_line, CounterSample, Error, LineClass};

/// Three aligned per-metric series built from one log file.
///
/// Index `i` of each vector belongs to the same data row, in file order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CounterSeries {
    pub ipc: Vec<f64>,
    pub misses_per_sec: Vec<f64>,
    pub llc_kb: Vec<u64>,
}

impl CounterSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to all three series
    pub fn push(&mut self, sample: CounterSample) {
        self.ipc.push(sample.ipc);
        self.misses_per_sec.push(sample.misses_per_sec);
        self.llc_kb.push(sample.llc_kb);
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.ipc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ipc.is_empty()
    }
}

/// Per-class line counts seen while parsing a log
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineStats {
    pub data_rows: usize,
    pub headers: usize,
    pub ignored: usize,
    pub malformed: usize,
}

impl LineStats {
    fn record(&mut self, class: &LineClass) {
        match class {
            LineClass::DataRow(_) => self.data_rows += 1,
            LineClass::Header => self.headers += 1,
            LineClass::Ignored => self.ignored += 1,
            LineClass::Malformed => self.malformed += 1,
        }
    }
}

/// A fully parsed counter log
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CounterLog {
    pub series: CounterSeries,
    pub stats: LineStats,
}

impl CounterLog {
    /// Parse a log from any buffered reader.
    ///
    /// Only I/O failures are errors. Lines that are not data rows are counted
    /// in [`LineStats`] and otherwise skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut log = CounterLog::default();

        for line in reader.lines() {
            let line = line?;
            let class = classify_line(&line);
            log.stats.record(&class);
            if let LineClass::DataRow(sample) = class {
                log.series.push(sample);
            }
        }

        Ok(log)
    }

    /// Open and parse the log file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: PathBuf::from(path),
            source,
        })?;

        Self::from_reader(BufReader::new(file)).map_err(|source| Error::Read {
            path: PathBuf::from(path),
            source,
        })
    }

    /// True when the log yielded no usable samples
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = "\
TIME                CORE    IPC      MISSES   LLC[KB]  MBL[MB/s]  MBR[MB/s]
TIME 2025-06-02 11:12:29
     20-27    0.27      53k      9520     2.21       0.00
TIME 2025-06-02 11:12:30
     20-27    0.31      49k      9712     2.05       0.00
     20-27    oops      49k      9712     2.05       0.00

not a data line at all
TIME 2025-06-02 11:12:31
     20-27    0.29      51000    9600     2.11       0.00
";

    #[test]
    fn test_pools_samples_across_time_blocks() {
        let log = CounterLog::from_reader(Cursor::new(LOG)).unwrap();

        assert_eq!(log.series.len(), 3);
        assert_eq!(log.series.ipc, vec![0.27, 0.31, 0.29]);
        assert_eq!(log.series.misses_per_sec, vec![53000.0, 49000.0, 51000.0]);
        assert_eq!(log.series.llc_kb, vec![9520, 9712, 9600]);
    }

    #[test]
    fn test_line_stats() {
        let log = CounterLog::from_reader(Cursor::new(LOG)).unwrap();

        assert_eq!(
            log.stats,
            LineStats {
                data_rows: 3,
                headers: 4,
                ignored: 2,
                malformed: 1,
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let log = CounterLog::from_reader(Cursor::new("")).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.stats, LineStats::default());
    }

    #[test]
    fn test_headers_only() {
        let log = CounterLog::from_reader(Cursor::new("TIME a\nTIME b\n")).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.stats.headers, 2);
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let bytes: &[u8] = b"20-27 0.27 53k 9520\n\xff\xfe\n";
        assert!(CounterLog::from_reader(Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = CounterLog::from_file("/nonexistent/dir/VM1_baseline.txt");
        match result {
            Err(Error::Open { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/dir/VM1_baseline.txt"));
            }
            other => panic!("Expected Open error, got {:?}", other),
        }
    }
}

use std::fs::File;
use std::hash::BuildHasherDefault;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use twox_hash::XxHash64;

use crate::config::Config;
use crate::error::TallyError;

/// Insertion-ordered count map. Iteration follows first-seen order, which the
/// report and the persisted file both depend on.
type CountMap = IndexMap<String, u64, BuildHasherDefault<XxHash64>>;

/// Result of a point lookup. `quit` is a reserved name that callers use to
/// leave interactive prompts, so it takes precedence over any real entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(u64),
    NotFound,
    QuitRequested,
}

impl LookupOutcome {
    /// Numeric compatibility form: the count when found, `-1` otherwise.
    pub fn as_sentinel(&self) -> i64 {
        match self {
            LookupOutcome::Found(count) => *count as i64,
            LookupOutcome::NotFound | LookupOutcome::QuitRequested => -1,
        }
    }
}

/// Accumulates occurrence counts for newline-delimited item-name records.
///
/// The table is created empty and only `ingest` mutates it. Ingest may run
/// any number of times; counts accumulate across calls. Lookup, report, and
/// persist each reflect whatever has been ingested so far.
pub struct FrequencyTable {
    source_label: String,
    sink_label: String,
    keep_empty_records: bool,
    counts: CountMap,
}

impl FrequencyTable {
    /// Creates an empty table. The labels identify where records come from
    /// and where the tally is written; no resource is opened here.
    pub fn new(source_label: &str, sink_label: &str) -> Self {
        Self::with_config(source_label, sink_label, &Config::default())
    }

    pub fn with_config(source_label: &str, sink_label: &str, config: &Config) -> Self {
        Self {
            source_label: source_label.to_string(),
            sink_label: sink_label.to_string(),
            keep_empty_records: config.keep_empty_records,
            counts: CountMap::default(),
        }
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn sink_label(&self) -> &str {
        &self.sink_label
    }

    /// Number of distinct items tallied so far.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tallies every record in the stream. Each record is trimmed of leading
    /// and trailing whitespace before counting; a record that trims to the
    /// empty string is counted under the empty-string key unless the table
    /// was configured to skip such records.
    ///
    /// A read error part way through surfaces as `SourceUnavailable` and
    /// leaves the records counted before it in place.
    pub fn ingest<I>(&mut self, records: I) -> Result<(), TallyError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for record in records {
            let record = record.map_err(|err| TallyError::SourceUnavailable {
                label: self.source_label.clone(),
                source: err,
            })?;
            let item = record.trim();
            if item.is_empty() && !self.keep_empty_records {
                continue;
            }
            *self.counts.entry(item.to_string()).or_insert(0) += 1;
        }
        Ok(())
    }

    /// Opens a text file and tallies its lines. The open failure and any
    /// read failure both surface as `SourceUnavailable`.
    pub fn ingest_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TallyError> {
        let file = File::open(path).map_err(|err| TallyError::SourceUnavailable {
            label: self.source_label.clone(),
            source: err,
        })?;
        self.ingest(BufReader::new(file).lines())
    }

    /// Tallies the file named by the stored source label.
    pub fn ingest_source(&mut self) -> Result<(), TallyError> {
        let path = self.source_label.clone();
        self.ingest_file(path)
    }

    /// Looks up the count for one item. Never mutates, never fails: an
    /// absent name is a normal `NotFound`, and the literal name `quit`
    /// is reported as `QuitRequested` before the map is consulted.
    pub fn lookup(&self, name: &str) -> LookupOutcome {
        if name == "quit" {
            return LookupOutcome::QuitRequested;
        }
        match self.counts.get(name) {
            Some(count) => LookupOutcome::Found(*count),
            None => LookupOutcome::NotFound,
        }
    }

    /// Renders the full tally as a bordered two-column listing, item names
    /// left-justified in a 12-character field and quantities right-justified
    /// in an 8-character field, rows in first-seen order. Pure rendering;
    /// printing and pausing are the caller's concern.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str(" ======================= \n");
        out.push_str(&format!("|{:<12}\t{:>8}|\n", "Produce Name", "Quantity"));
        out.push_str("|=======================|\n");
        for (name, count) in &self.counts {
            out.push_str(&format!("|{:<12}\t{:>8}|\n", name, count));
        }
        out.push_str("|-----------------------|\n");
        out
    }

    /// Writes one `<name> <count>` line per entry, first-seen order, to the
    /// file named by the stored sink label. `locate` supplies the directory
    /// the returned location is resolved against, so the caller can report
    /// where the tally landed.
    pub fn persist_with<L>(&self, locate: L) -> Result<PathBuf, TallyError>
    where
        L: FnOnce() -> io::Result<PathBuf>,
    {
        let file = File::create(&self.sink_label).map_err(|err| TallyError::SinkWriteFailure {
            label: self.sink_label.clone(),
            source: err,
        })?;
        let mut writer = BufWriter::new(file);
        for (name, count) in &self.counts {
            writeln!(writer, "{} {}", name, count).map_err(|err| TallyError::SinkWriteFailure {
                label: self.sink_label.clone(),
                source: err,
            })?;
        }
        writer.flush().map_err(|err| TallyError::SinkWriteFailure {
            label: self.sink_label.clone(),
            source: err,
        })?;
        let base = locate().map_err(|err| TallyError::SinkWriteFailure {
            label: self.sink_label.clone(),
            source: err,
        })?;
        Ok(base.join(&self.sink_label))
    }

    /// `persist_with` resolved against the process working directory.
    pub fn persist(&self) -> Result<PathBuf, TallyError> {
        self.persist_with(std::env::current_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_from(lines: &[&str]) -> FrequencyTable {
        let mut table = FrequencyTable::new("test_input.txt", "test_output.dat");
        table
            .ingest(lines.iter().map(|l| Ok(l.to_string())))
            .unwrap();
        table
    }

    #[test]
    fn counts_occurrences_after_trimming() {
        let table = table_from(&["apple\n", "  banana  ", "apple", "apple\r\n"]);
        assert_eq!(table.lookup("apple"), LookupOutcome::Found(3));
        assert_eq!(table.lookup("banana"), LookupOutcome::Found(1));
    }

    #[test]
    fn absent_name_is_not_found() {
        let table = table_from(&["apple"]);
        assert_eq!(table.lookup("cherry"), LookupOutcome::NotFound);
        assert_eq!(table.lookup("cherry").as_sentinel(), -1);
    }

    #[test]
    fn quit_wins_even_when_tallied() {
        let table = table_from(&["quit", "quit"]);
        assert_eq!(table.lookup("quit"), LookupOutcome::QuitRequested);
        assert_eq!(table.lookup("quit").as_sentinel(), -1);
    }

    #[test]
    fn found_sentinel_is_the_count() {
        let table = table_from(&["pear", "pear"]);
        assert_eq!(table.lookup("pear").as_sentinel(), 2);
    }

    #[test]
    fn ingest_is_cumulative() {
        let mut table = table_from(&["apple", "banana"]);
        table
            .ingest(["apple", "banana"].iter().map(|l| Ok(l.to_string())))
            .unwrap();
        assert_eq!(table.lookup("apple"), LookupOutcome::Found(2));
        assert_eq!(table.lookup("banana"), LookupOutcome::Found(2));
    }

    #[test]
    fn whitespace_only_record_becomes_empty_key_by_default() {
        let table = table_from(&["   \n", "apple"]);
        assert_eq!(table.lookup(""), LookupOutcome::Found(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_records_skipped_when_policy_disabled() {
        let config = Config {
            keep_empty_records: false,
        };
        let mut table = FrequencyTable::with_config("in.txt", "out.dat", &config);
        table
            .ingest(["   ", "apple", ""].iter().map(|l| Ok(l.to_string())))
            .unwrap();
        assert_eq!(table.lookup(""), LookupOutcome::NotFound);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn read_error_keeps_partial_state() {
        let mut table = FrequencyTable::new("in.txt", "out.dat");
        let records = vec![
            Ok("apple".to_string()),
            Ok("banana".to_string()),
            Err(io::Error::new(io::ErrorKind::Other, "disk gone")),
            Ok("cherry".to_string()),
        ];
        let err = table.ingest(records).unwrap_err();
        assert!(matches!(err, TallyError::SourceUnavailable { .. }));
        assert_eq!(table.lookup("apple"), LookupOutcome::Found(1));
        assert_eq!(table.lookup("banana"), LookupOutcome::Found(1));
        assert_eq!(table.lookup("cherry"), LookupOutcome::NotFound);
    }

    #[test]
    fn missing_input_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");
        let mut table = FrequencyTable::new(missing.to_str().unwrap(), "out.dat");
        let err = table.ingest_source().unwrap_err();
        assert!(matches!(err, TallyError::SourceUnavailable { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn report_layout_matches_reference() {
        let table = table_from(&["apple", "banana", "apple", "apple"]);
        let expected = concat!(
            " ======================= \n",
            "|Produce Name\tQuantity|\n",
            "|=======================|\n",
            "|apple       \t       3|\n",
            "|banana      \t       1|\n",
            "|-----------------------|\n",
        );
        assert_eq!(table.report(), expected);
    }

    #[test]
    fn empty_table_report_has_no_data_rows() {
        let table = FrequencyTable::new("in.txt", "out.dat");
        let expected = concat!(
            " ======================= \n",
            "|Produce Name\tQuantity|\n",
            "|=======================|\n",
            "|-----------------------|\n",
        );
        assert_eq!(table.report(), expected);
    }

    #[test]
    fn persist_writes_name_space_count_in_first_seen_order() {
        let dir = tempfile::tempdir().unwrap();
        let sink = dir.path().join("frequency.dat");
        let mut table = FrequencyTable::new("in.txt", sink.to_str().unwrap());
        table
            .ingest(
                ["banana", "apple", "banana"]
                    .iter()
                    .map(|l| Ok(l.to_string())),
            )
            .unwrap();
        let location = table.persist_with(|| Ok(PathBuf::from("/work"))).unwrap();
        assert_eq!(location, PathBuf::from("/work").join(sink.to_str().unwrap()));
        let written = std::fs::read_to_string(&sink).unwrap();
        assert_eq!(written, "banana 2\napple 1\n");
    }

    #[test]
    fn persist_empty_table_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = dir.path().join("frequency.dat");
        let table = FrequencyTable::new("in.txt", sink.to_str().unwrap());
        table.persist_with(|| Ok(dir.path().to_path_buf())).unwrap();
        assert_eq!(std::fs::read_to_string(&sink).unwrap(), "");
    }

    #[test]
    fn persist_to_unwritable_destination_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sink = dir.path().join("no_such_dir").join("frequency.dat");
        let mut table = FrequencyTable::new("in.txt", sink.to_str().unwrap());
        table.ingest([Ok("apple".to_string())]).unwrap();
        let err = table.persist_with(|| Ok(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, TallyError::SinkWriteFailure { .. }));
    }
}

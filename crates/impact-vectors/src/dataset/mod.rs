mod parser;

use crate::impact::ProjectRecord;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read project dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid project CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads project rows from a CSV export whose header row names the fields.
pub struct ProjectDataset;

impl ProjectDataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectRecord>, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProjectRecord>, DatasetError> {
        Ok(parser::parse_records(reader)?)
    }
}

/// Supplies a fresh record snapshot for every evaluation.
pub trait ProjectSource: Send + Sync {
    fn load(&self) -> Result<Vec<ProjectRecord>, DatasetError>;
}

/// Re-reads a CSV file on each load so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct CsvProjectSource {
    path: PathBuf,
}

impl CsvProjectSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectSource for CsvProjectSource {
    fn load(&self) -> Result<Vec<ProjectRecord>, DatasetError> {
        let records = ProjectDataset::from_path(&self.path)?;
        debug!(path = %self.path.display(), records = records.len(), "loaded project dataset");
        Ok(records)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectSource {
    records: Arc<Vec<ProjectRecord>>,
}

impl InMemoryProjectSource {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

impl ProjectSource for InMemoryProjectSource {
    fn load(&self) -> Result<Vec<ProjectRecord>, DatasetError> {
        Ok(self.records.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::FieldValue;
    use std::io::Cursor;

    #[test]
    fn header_row_names_the_fields() {
        let csv = "\u{feff}Meta: Project Name,OSO: Total Stars,OSO: Date First Commit\n\
Protocol Guild,120,2021-03-04\n";
        let records = ProjectDataset::from_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(
            record.get("Meta: Project Name"),
            Some(&FieldValue::from("Protocol Guild"))
        );
        assert_eq!(record.get("OSO: Total Stars"), Some(&FieldValue::from("120")));
        assert_eq!(
            record.get("OSO: Date First Commit"),
            Some(&FieldValue::from("2021-03-04"))
        );
    }

    #[test]
    fn cells_keep_their_text_and_blank_cells_are_absent() {
        assert_eq!(
            parser::parse_cell_for_tests(" 4.5 "),
            Some(FieldValue::from("4.5"))
        );
        assert_eq!(
            parser::parse_cell_for_tests("TRUE"),
            Some(FieldValue::from("TRUE"))
        );
        assert_eq!(
            parser::parse_cell_for_tests("0xabc"),
            Some(FieldValue::from("0xabc"))
        );
        assert_eq!(parser::parse_cell_for_tests("   "), None);
    }

    #[test]
    fn numeric_looking_metadata_is_kept_verbatim() {
        let csv = "Meta: Project Name,Meta: Website,OSO: Total Stars
007,1e3,12
";
        let records = ProjectDataset::from_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(
            records[0].get("Meta: Project Name"),
            Some(&FieldValue::from("007"))
        );
        assert_eq!(records[0].get("Meta: Website"), Some(&FieldValue::from("1e3")));
    }

    #[test]
    fn blank_cells_do_not_create_fields() {
        let csv = "Meta: Project Name,Meta: Website,OSO: Total Stars\nLonely,,\n";
        let records = ProjectDataset::from_reader(Cursor::new(csv)).expect("parses");
        assert_eq!(records[0].len(), 1);
        assert!(records[0].get("Meta: Website").is_none());
    }

    #[test]
    fn ragged_rows_do_not_sink_the_export() {
        let csv = "Meta: Project Name,OSO: Total Stars
A,10
B,20,extra
C
D,40
";
        let records = ProjectDataset::from_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(records.len(), 4);
        assert_eq!(records[1].get("OSO: Total Stars"), Some(&FieldValue::from("20")));
        assert_eq!(records[1].len(), 2);
        assert_eq!(records[2].get("Meta: Project Name"), Some(&FieldValue::from("C")));
        assert!(records[2].get("OSO: Total Stars").is_none());
        assert_eq!(records[3].get("OSO: Total Stars"), Some(&FieldValue::from("40")));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = CsvProjectSource::new("./does-not-exist.csv");
        match source.load() {
            Err(DatasetError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn in_memory_source_returns_independent_snapshots() {
        let source = InMemoryProjectSource::new(vec![ProjectRecord::new().with_field("x", 1.0)]);
        let first = source.load().expect("loads");
        let second = source.load().expect("loads");
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}

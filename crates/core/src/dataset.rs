//! The in-memory student dataset.
//!
//! Loaded once at startup and shared read-only afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::error::{DomainError, DomainResult};
use crate::student::StudentRecord;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dataset: {0}")]
    Invalid(#[from] DomainError),
}

/// Ordered, immutable collection of validated student records.
///
/// Cloning is cheap (shared `Arc`), so handlers can hold their own copy.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[StudentRecord]>,
}

impl Dataset {
    /// Build a dataset, checking every record invariant and id uniqueness.
    pub fn from_records(records: Vec<StudentRecord>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.student_id) {
                return Err(DomainError::invariant(format!(
                    "duplicate student_id {}",
                    record.student_id
                )));
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<StudentRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records)?)
    }

    /// Read and parse a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::StudentId;

    const SAMPLE: &str = r#"[
        {"student_id": 1, "name": "Aarav", "grade": 8, "class": "8A", "region": "North",
         "quizzes": [{"quiz": "Algebra", "score": 70, "date": "2025-07-08"}]},
        {"student_id": 2, "name": "Bela", "grade": "9", "class": "9B", "region": "South",
         "submissions": [{"assignment": "Essay", "status": "late",
                          "submitted_at": "2025-07-06T09:30:00Z"}]}
    ]"#;

    #[test]
    fn parses_json_array_in_order() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.len(), 2);
        let ids: Vec<StudentId> = ds.records().iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec![StudentId::new(1), StudentId::new(2)]);
        assert_eq!(ds.records()[0].grade, "8");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[
            {"student_id": 1, "name": "A", "grade": "8", "class": "8A", "region": "North"},
            {"student_id": 1, "name": "B", "grade": "8", "class": "8B", "region": "North"}
        ]"#;
        let err = Dataset::from_json_str(json).unwrap_err();
        assert!(matches!(err, DatasetError::Invalid(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn rejects_empty_class() {
        let json = r#"[{"student_id": 1, "name": "A", "grade": "8", "class": "", "region": "North"}]"#;
        assert!(matches!(
            Dataset::from_json_str(json),
            Err(DatasetError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Dataset::from_json_str("{not json"),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let path = std::env::temp_dir().join("dumroo-core-missing-dataset.json");
        let _ = std::fs::remove_file(&path);
        let err = Dataset::load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("dumroo-core-missing-dataset.json"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "dumroo-core-dataset-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, SAMPLE).unwrap();
        let ds = Dataset::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 2);
    }
}

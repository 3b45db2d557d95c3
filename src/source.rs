use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::MessageRecord;

/// Where dialog records come from
pub trait RecordSource {
    /// Dialog files to read, in processing order
    fn dialogs(&self) -> Result<Vec<PathBuf>>;

    /// Every row of one dialog, in file order.
    ///
    /// The outer error means the dialog could not be read at all; an inner
    /// error is one row that did not convert into a record.
    fn read_dialog(&self, path: &Path) -> Result<Vec<Result<MessageRecord>>>;
}

/// A directory of per-dialog CSV exports
#[derive(Debug, Clone)]
pub struct DialogDirectory {
    dir: PathBuf,
    max_dialogs: Option<usize>,
}

impl DialogDirectory {
    pub fn new(dir: impl Into<PathBuf>, max_dialogs: Option<usize>) -> Self {
        Self {
            dir: dir.into(),
            max_dialogs,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordSource for DialogDirectory {
    fn dialogs(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "Dialog directory not found, nothing to read");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
                files.push(path);
            }
        }
        files.sort();

        if let Some(max) = self.max_dialogs {
            files.truncate(max);
        }
        if files.is_empty() {
            warn!(dir = %self.dir.display(), "No dialog CSV files found");
        }
        Ok(files)
    }

    fn read_dialog(&self, path: &Path) -> Result<Vec<Result<MessageRecord>>> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let rows: Vec<_> = reader
            .records()
            .map(|row| {
                let row = row?;
                let fields: HashMap<String, String> = headers
                    .iter()
                    .zip(row.iter())
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                MessageRecord::from_row(&fields)
            })
            .collect();

        debug!(path = %path.display(), rows = rows.len(), "Dialog read");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageKind;
    use std::fs::write;

    #[test]
    fn test_lists_csv_files_sorted_and_limited() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.csv", "a.csv", "c.csv", "notes.txt"] {
            write(dir.path().join(name), "date,type,id\n").unwrap();
        }

        let all = DialogDirectory::new(dir.path(), None).dialogs().unwrap();
        let names: Vec<_> = all
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);

        let limited = DialogDirectory::new(dir.path(), Some(2)).dialogs().unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = DialogDirectory::new(dir.path().join("absent"), None);
        assert!(source.dialogs().unwrap().is_empty());
    }

    #[test]
    fn test_read_dialog_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.csv");
        write(
            &path,
            "date,type,message,duration,fwd_from,id\n\
             2023-01-01 5:30,text,\"hi, there\",,,u1\n\
             2023-01-01 6:00,voice,,12,someone,u2\n",
        )
        .unwrap();

        let records: Vec<_> = DialogDirectory::new(dir.path(), None)
            .read_dialog(&path)
            .unwrap()
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].kind,
            MessageKind::Text {
                body: "hi, there".to_string()
            }
        );
        assert!(!records[0].forwarded);
        assert_eq!(records[1].kind, MessageKind::Voice { duration: 12 });
        assert!(records[1].forwarded);
        assert_eq!(records[1].sender, "u2");
    }

    #[test]
    fn test_bad_row_does_not_hide_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.csv");
        write(
            &path,
            "date,type,message,duration,fwd_from,id\n\
             2023-01-01 3:00,voice,,,,u1\n\
             2023-01-01 3:00,photo,,,,u1\n",
        )
        .unwrap();

        let rows = DialogDirectory::new(dir.path(), None).read_dialog(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0], Err(crate::error::ChatStatsError::InvalidDuration(_))));
        assert_eq!(rows[1].as_ref().unwrap().kind, MessageKind::Photo);
    }
}

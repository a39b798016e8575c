use std::path::PathBuf;

use crate::config::IngestionConfig;
use crate::data::{loader, preprocess, saver, split};
use crate::error::IngestError;
use crate::logging::LogContext;

// ---------------------------------------------------------------------------
// Pipeline orchestration
// ---------------------------------------------------------------------------

/// What a successful run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub raw_dir: PathBuf,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Run load → preprocess → split → save. The first failing stage aborts
/// the run; nothing from a failed run is kept in memory.
pub fn run(config: &IngestionConfig, log: &LogContext) -> Result<RunSummary, IngestError> {
    let table = loader::load(&config.source, log)?;
    if table.is_empty() {
        log::error!(target: log.name(), "No data rows in {}", config.source);
        return Err(IngestError::EmptyDataset);
    }
    let cleaned = preprocess::preprocess(&table, &config.placeholder_columns, log)?;
    drop(table);

    let parts = split::split(cleaned, &config.split, log)?;
    let raw_dir = saver::save(&parts.train, &parts.test, &config.output_dir, log)?;

    Ok(RunSummary {
        raw_dir,
        train_rows: parts.train.len(),
        test_rows: parts.test.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LabeledText;
    use crate::error::ErrorKind;
    use std::fs;
    use std::path::Path;

    fn write_source(dir: &Path, rows: usize) -> PathBuf {
        let mut contents = String::from("v1,v2,,,\n");
        for i in 0..rows {
            let label = if i % 3 == 0 { "spam" } else { "ham" };
            contents.push_str(&format!("{label},\"message {i}, with a comma\",,,\n"));
        }
        let path = dir.join("spam.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    fn config_for(dir: &Path, source: &Path) -> IngestionConfig {
        IngestionConfig {
            source: source.to_str().unwrap().to_string(),
            output_dir: dir.join("data"),
            ..IngestionConfig::default()
        }
    }

    fn read_rows(path: &Path) -> Vec<LabeledText> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(header, vec!["target", "text"]);
        reader.deserialize().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_end_to_end_ten_rows() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 10);
        let config = config_for(dir.path(), &source);
        let log = LogContext::new("data_ingestion");

        let summary = run(&config, &log).unwrap();
        assert_eq!(summary.raw_dir, dir.path().join("data/raw"));
        assert_eq!(summary.train_rows, 8);
        assert_eq!(summary.test_rows, 2);

        let train = read_rows(&summary.raw_dir.join("train.csv"));
        let test = read_rows(&summary.raw_dir.join("test.csv"));
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let mut all: Vec<String> = train.iter().chain(&test).map(|r| r.text.clone()).collect();
        all.sort();
        let mut expected: Vec<String> = (0..10)
            .map(|i| format!("message {i}, with a comma"))
            .collect();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 50);
        let config = config_for(dir.path(), &source);
        let log = LogContext::new("data_ingestion");

        let summary = run(&config, &log).unwrap();
        let first = fs::read_to_string(summary.raw_dir.join("test.csv")).unwrap();
        run(&config, &log).unwrap();
        let second = fs::read_to_string(summary.raw_dir.join("test.csv")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_schema_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bad.csv");
        fs::write(&source, "v1,v2,extra\nham,hi,x\n").unwrap();
        let config = config_for(dir.path(), &source);
        let log = LogContext::new("data_ingestion");

        let err = run(&config, &log).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn test_header_only_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 0);
        let config = config_for(dir.path(), &source);
        let log = LogContext::new("data_ingestion");

        let err = run(&config, &log).unwrap_err();
        assert!(matches!(err, IngestError::EmptyDataset));
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn test_missing_source_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), &dir.path().join("absent.csv"));
        let log = LogContext::new("data_ingestion");

        let err = run(&config, &log).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use super::model::LabeledText;
use crate::error::IngestError;
use crate::logging::LogContext;

const HEADER: [&str; 2] = ["target", "text"];

/// Write both partitions to `<output_dir>/raw/{train,test}.csv`.
///
/// Returns the `raw` directory. The header is written even when a
/// partition is empty.
pub fn save(
    train: &[LabeledText],
    test: &[LabeledText],
    output_dir: &Path,
    log: &LogContext,
) -> Result<PathBuf, IngestError> {
    let raw_dir = output_dir.join("raw");

    let result = fs::create_dir_all(&raw_dir)
        .map_err(|e| IngestError::io(&raw_dir, e))
        .and_then(|_| write_csv(&raw_dir.join("train.csv"), train))
        .and_then(|_| write_csv(&raw_dir.join("test.csv"), test));

    match result {
        Ok(()) => {
            log::debug!(
                target: log.name(),
                "Train and test data saved to {}",
                raw_dir.display()
            );
            Ok(raw_dir)
        }
        Err(e) => {
            log::error!(
                target: log.name(),
                "Unexpected error occurred while saving the data: {e}"
            );
            Err(e)
        }
    }
}

fn write_csv(path: &Path, rows: &[LabeledText]) -> Result<(), IngestError> {
    let write_err = |source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_err)?;

    writer.write_record(HEADER).map_err(write_err)?;
    for row in rows {
        writer.serialize(row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| IngestError::io(path, e))
}

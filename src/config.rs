use std::path::PathBuf;

use crate::data::split::SplitOptions;

/// Public spam/ham SMS dataset the pipeline ingests by default.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/vikashishere/Datasets/refs/heads/main/spam.csv";

// ---------------------------------------------------------------------------
// IngestionConfig
// ---------------------------------------------------------------------------

/// Everything a pipeline run needs, passed explicitly into [`crate::pipeline::run`].
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    /// Filesystem path or http(s) URL of the source CSV.
    pub source: String,
    pub split: SplitOptions,
    /// Base directory; partitions land in `<output_dir>/raw`.
    pub output_dir: PathBuf,
    /// Columns dropped by the preprocessor. All must be present.
    pub placeholder_columns: Vec<String>,
    pub log_dir: PathBuf,
    pub log_file: String,
    pub logger_name: String,
    /// Exit with a failure status when the run fails.
    pub exit_nonzero_on_failure: bool,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            split: SplitOptions::default(),
            output_dir: PathBuf::from("./data"),
            placeholder_columns: vec![
                "Unnamed: 2".to_string(),
                "Unnamed: 3".to_string(),
                "Unnamed: 4".to_string(),
            ],
            log_dir: PathBuf::from("logs"),
            log_file: "data_ingestion.log".to_string(),
            logger_name: "data_ingestion".to_string(),
            exit_nonzero_on_failure: true,
        }
    }
}

impl IngestionConfig {
    /// Full path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }
}

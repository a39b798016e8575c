mod config;
mod data;
mod error;
mod logging;
mod pipeline;

use std::process::ExitCode;

use config::IngestionConfig;
use error::IngestError;
use logging::LogContext;

fn main() -> ExitCode {
    let config = IngestionConfig::default();

    if let Err(e) = logging::init(&config.logger_name, &config.log_path()) {
        eprintln!("Error : {e:#}");
        return ExitCode::FAILURE;
    }
    let log = LogContext::new(&config.logger_name);

    match pipeline::run(&config, &log) {
        Ok(summary) => {
            log::info!(
                target: log.name(),
                "Data ingestion finished: {} train rows, {} test rows in {}",
                summary.train_rows,
                summary.test_rows,
                summary.raw_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => ExitCode::from(report(&e, &config, &log)),
    }
}

/// Log and print a failed run; returns the process exit status.
fn report(err: &IngestError, config: &IngestionConfig, log: &LogContext) -> u8 {
    log::error!(
        target: log.name(),
        "Failed to complete the data ingestion process ({:?} error): {err}",
        err.kind()
    );
    println!("Error : {err}");
    u8::from(config.exit_nonzero_on_failure)
}

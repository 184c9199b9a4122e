use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Install(#[from] log::SetLoggerError),
}

/// Route `log` records to a file. Writing to stderr would tear the
/// alternate screen, so without a usable file logging stays off and the
/// caller gets the reason. No path means logging is off on purpose.
pub fn init(path: Option<&Path>) -> Result<(), LoggingError> {
    let Some(path) = path else {
        return Ok(());
    };

    let io_err = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()?;

    Ok(())
}

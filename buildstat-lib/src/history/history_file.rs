use super::History;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};

const LOG_TARGET: &str = "   history";

/// The JSON file that holds the run history of a project.
///
/// The file contains a single object of the form `{"data": [record, ...]}` with the most recent
/// run first. There is no locking: two concurrent runs race and the last writer wins.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: Utf8PathBuf,
}

impl HistoryFile {
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the history, treating a missing file as an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a valid history document.
    pub fn load(&self) -> Result<History> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(target: LOG_TARGET, "No history found at '{}', starting fresh", self.path);
                return Ok(History::new());
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to open history file '{}'", self.path)),
        };

        let history: History = serde_json::from_reader(BufReader::new(file))
            .into_app_err_with(|| format!("unable to parse history file '{}'", self.path))?;

        log::debug!(target: LOG_TARGET, "Loaded {} record(s) from '{}'", history.len(), self.path);
        Ok(history)
    }

    /// Write the complete history back to disk, creating parent directories as needed.
    ///
    /// The document is written to a sibling `.tmp` file that then replaces the history file, so a
    /// failed write leaves the previous history in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written.
    pub fn save(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{parent}'"))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_document(&temp_path, history) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path)
            .into_app_err_with(|| format!("unable to replace history file '{}'", self.path))?;

        log::debug!(target: LOG_TARGET, "Saved {} record(s) to '{}'", history.len(), self.path);
        Ok(())
    }

    fn temp_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.tmp", self.path))
    }
}

fn write_document(path: &Utf8Path, history: &History) -> Result<()> {
    let file = File::create(path).into_app_err_with(|| format!("unable to create history file '{path}'"))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, history).into_app_err_with(|| format!("unable to write history file '{path}'"))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush history file '{path}'"))?;

    Ok(())
}

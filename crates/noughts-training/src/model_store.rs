//! Durable storage for the fitted classifier.
//!
//! The store holds exactly one JSON document at a fixed path. Every successful
//! retrain overwrites it; there is no history and no migration. Writes go to a
//! sibling `*.tmp` file first and are renamed into place, so a reader never sees
//! a half-written model.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use noughts_evaluator::classifier::LogisticClassifier;
use serde::{Deserialize, Serialize};

/// File name used when no path is configured.
pub const DEFAULT_MODEL_FILE: &str = "tictactoe_model.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Size of the training buffer the classifier was fitted on.
    pub example_count: usize,
    pub classifier: LogisticClassifier,
}

impl PersistedModel {
    #[must_use]
    pub fn new(classifier: LogisticClassifier, example_count: usize) -> Self {
        Self {
            name: "tictactoe".to_owned(),
            trained_at: Utc::now(),
            example_count,
            classifier,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ModelStoreError {
    #[display("failed to read model file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse model file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to write model file {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[display("failed to serialize model to {}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_FILE)
    }
}

impl ModelStore {
    #[must_use]
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored model; a missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<PersistedModel>, ModelStoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ModelStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let model = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ModelStoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(Some(model))
    }

    /// Replaces the stored model with `model`.
    pub fn save(&self, model: &PersistedModel) -> Result<(), ModelStoreError> {
        let tmp_path = self.tmp_path();
        let write_err = |source| ModelStoreError::Write {
            path: tmp_path.clone(),
            source,
        };

        let file = File::create(&tmp_path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, model).map_err(|source| {
            ModelStoreError::Serialize {
                path: tmp_path.clone(),
                source,
            }
        })?;
        writeln!(writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|source| ModelStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

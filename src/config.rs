use serde::Deserialize;
use std::fs;
use std::io;

use crate::error::TallyError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether a whitespace-only input line is tallied under the empty-string
    /// key (the historical behavior) or skipped.
    pub keep_empty_records: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keep_empty_records: true,
        }
    }
}

/// Reads the runtime configuration from a JSON file. A missing file is not an
/// error; defaults apply. A file that exists but fails to parse is.
pub fn read_config(file_path: &str) -> Result<Config, TallyError> {
    let config_data = match fs::read_to_string(file_path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => {
            return Err(TallyError::SourceUnavailable {
                label: file_path.to_string(),
                source: err,
            })
        }
    };
    serde_json::from_str(&config_data).map_err(|err| TallyError::ConfigInvalid {
        label: file_path.to_string(),
        source: err,
    })
}

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{ImportError, RawExercise};

pub const REMOTE_URL: &str =
    "https://raw.githubusercontent.com/yuhonas/free-exercise-db/main/dist/exercises.json";

/// Vendored copy, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/free-exercise-db/exercises.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the dataset may come from: a vendored file and, when allowed, a remote URL
/// whose download is cached back into the vendored location.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    pub default_path: PathBuf,
    pub remote_url: String,
    pub timeout: Duration,
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource {
            default_path: PathBuf::from(DEFAULT_DATASET_PATH),
            remote_url: REMOTE_URL.to_string(),
            timeout: FETCH_TIMEOUT,
        }
    }
}

impl DatasetSource {
    pub fn with_default_path(path: impl Into<PathBuf>) -> Self {
        DatasetSource {
            default_path: path.into(),
            ..Default::default()
        }
    }

    /// Resolve the dataset: `path_hint` if it exists, else the vendored file, else the
    /// remote URL when `allow_remote` is set.
    pub async fn load(
        &self,
        path_hint: Option<&Path>,
        allow_remote: bool,
    ) -> Result<Vec<RawExercise>, ImportError> {
        if let Some(hint) = path_hint {
            if hint.exists() {
                return read_file(hint);
            }
            debug!("Dataset hint {} does not exist", hint.display());
        }

        if self.default_path.exists() {
            return read_file(&self.default_path);
        }

        if allow_remote {
            return self.download().await;
        }

        Err(ImportError::NotFound(
            "Free Exercise DB not found locally. Provide a local path or allow download to fetch once."
                .to_string(),
        ))
    }

    async fn download(&self) -> Result<Vec<RawExercise>, ImportError> {
        info!("Downloading dataset from {} ...", self.remote_url);
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let body = client
            .get(&self.remote_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let records: Vec<RawExercise> = serde_json::from_slice(&body)?;

        if let Some(parent) = self.default_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.default_path, &body)?;
        info!("Saved dataset to {}", self.default_path.display());
        Ok(records)
    }
}

fn read_file(path: &Path) -> Result<Vec<RawExercise>, ImportError> {
    debug!("Reading dataset from {}", path.display());
    let content = fs::read_to_string(path)?;
    let records: Vec<RawExercise> = serde_json::from_str(&content)?;
    info!("Loaded {} entries from {}", records.len(), path.display());
    Ok(records)
}

/// [`DatasetSource::load`] with the default vendored path and upstream URL.
pub async fn load(
    path_hint: Option<&Path>,
    allow_remote: bool,
) -> Result<Vec<RawExercise>, ImportError> {
    DatasetSource::default().load(path_hint, allow_remote).await
}

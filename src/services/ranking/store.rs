//! File backed storage for the ranking. The whole ranking is stored
//! as a single JSON array which is replaced in full on every save

use super::{models::RankingEntry, RankingError, RankingResult};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};

pub struct RankingStore {
    /// Path to the ranking file
    path: PathBuf,
}

impl RankingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temporary file that saves are written to before
    /// being moved over the ranking file
    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    /// Loads the stored ranking. A missing or empty file is an empty
    /// ranking, anything else that isn't a valid ranking is reported
    /// as [`RankingError::Corrupt`]
    pub async fn load(&self) -> RankingResult<Vec<RankingEntry>> {
        let bytes = match fs::read(&self.path).await {
            Ok(value) => value,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(RankingError::Corrupt)
    }

    /// Replaces the stored ranking with `ranking`. The data is written to
    /// a temporary file first then renamed into place so readers only ever
    /// see the previous or the new ranking in full
    pub async fn save(&self, ranking: &[RankingEntry]) -> RankingResult<()> {
        let bytes = serde_json::to_vec_pretty(ranking).map_err(RankingError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(err) = fs::rename(&temp_path, &self.path).await {
            // Don't leave the partial write around
            let _ = fs::remove_file(&temp_path).await;
            return Err(err.into());
        }

        Ok(())
    }
}

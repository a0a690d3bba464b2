//! Plain-text file store: one decimal integer on the first line

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::HighScoreStore;

#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, score: u64) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            write!(file, "{}", score)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_high_score(&mut self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let first = contents.lines().next().unwrap_or("").trim();
                match first.parse::<u64>() {
                    Ok(score) => {
                        log::info!("Loaded high score {} from {}", score, self.path.display());
                        score
                    }
                    Err(_) => {
                        log::warn!(
                            "High score file {} is corrupt ({:?}), starting from 0",
                            self.path.display(),
                            first
                        );
                        0
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score found, creating {}", self.path.display());
                if let Err(e) = self.write_atomic(0) {
                    log::warn!("Could not create {}: {}", self.path.display(), e);
                }
                0
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) -> std::io::Result<()> {
        self.write_atomic(score)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::codec::{self, FormatError};
use crate::game::GameState;

/// Failure to persist or restore a game.
///
/// `Io` means the save could not be reached at all (missing, unreadable,
/// unwritable); `Format` means it was read but is corrupt.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid save file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl RepositoryError {
    /// True when no save exists at the location.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Save slot for a single game.
pub trait GameRepository {
    fn save(&self, state: &GameState) -> Result<(), RepositoryError>;

    fn load(&self) -> Result<GameState, RepositoryError>;
}

/// Stores the text save format at a caller-chosen path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGameRepository {
    path: PathBuf,
}

impl FileGameRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn io_error(&self, source: io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Sibling path used while writing, renamed over the target once complete.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl GameRepository for FileGameRepository {
    #[instrument(skip(self, state), fields(path = %self.path.display()))]
    fn save(&self, state: &GameState) -> Result<(), RepositoryError> {
        let staging = self.staging_path();
        let text = codec::encode(state);

        let written = fs::File::create(&staging).and_then(|mut file| {
            file.write_all(text.as_bytes())?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|()| fs::rename(&staging, &self.path)) {
            warn!(error = %err, "failed to save game");
            let _ = fs::remove_file(&staging);
            return Err(self.io_error(err));
        }

        debug!(bytes = text.len(), "saved game");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<GameState, RepositoryError> {
        let bytes = fs::read(&self.path).map_err(|err| self.io_error(err))?;

        let state = codec::decode_bytes(&bytes).map_err(|source| {
            warn!(error = %source, "rejected corrupt save");
            RepositoryError::Format {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!(turn = ?state.current_turn, "loaded game");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Disk, PlayerMode, Position};
    use tempfile::TempDir;

    fn repository() -> (TempDir, FileGameRepository) {
        let dir = TempDir::new().unwrap();
        let repo = FileGameRepository::new(dir.path().join("Game"));
        (dir, repo)
    }

    #[test]
    fn save_then_load_restores_state() {
        let (_dir, repo) = repository();
        let state = GameState::initial()
            .play(Disk::Dark, Position::new(2, 3))
            .unwrap()
            .state
            .with_player_mode(PlayerMode::Computer, Disk::Light);

        repo.save(&state).unwrap();

        assert!(repo.exists());
        assert_eq!(repo.load().unwrap(), state);
    }

    #[test]
    fn save_writes_exact_text_format() {
        let (_dir, repo) = repository();

        repo.save(&GameState::initial()).unwrap();

        let text = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(text, codec::encode(&GameState::initial()));
        assert!(!repo.staging_path().exists());
    }

    #[test]
    fn later_save_replaces_earlier_one() {
        let (_dir, repo) = repository();
        let over = GameState::initial().with_turn(None);

        repo.save(&GameState::initial()).unwrap();
        repo.save(&over).unwrap();

        assert_eq!(repo.load().unwrap(), over);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let (_dir, repo) = repository();

        let err = repo.load().unwrap_err();

        assert!(matches!(err, RepositoryError::Io { .. }));
        assert!(err.is_not_found());
        assert!(!repo.exists());
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let (_dir, repo) = repository();
        fs::write(repo.path(), "invalid").unwrap();

        let err = repo.load().unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Format {
                source: FormatError::Truncated { lines: 1 },
                ..
            }
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn non_utf8_file_is_a_format_error() {
        let (_dir, repo) = repository();
        fs::write(repo.path(), [0xff, 0xfe, b'\n']).unwrap();

        let err = repo.load().unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Format {
                source: FormatError::Encoding(_),
                ..
            }
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn unwritable_location_is_an_io_error() {
        let (dir, _) = repository();
        let repo = FileGameRepository::new(dir.path().join("missing").join("Game"));

        let err = repo.save(&GameState::initial()).unwrap_err();

        assert!(matches!(err, RepositoryError::Io { .. }));
    }
}

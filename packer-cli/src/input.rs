//! Puzzle input loading

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// A puzzle input file on disk
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the whole file
    pub fn read(&self) -> Result<String, InputError> {
        fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::NotFound(self.path.clone()),
            _ => InputError::Io {
                path: self.path.clone(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("day12.txt");
        let content = "0:\n#\n\n2x2: 4\n";
        fs::write(&path, content).unwrap();

        let input = InputFile::new(path);
        assert_eq!(input.read().unwrap(), content);
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let input = InputFile::new(temp.path().join("missing.txt"));

        assert!(matches!(input.read(), Err(InputError::NotFound(_))));
    }

    #[test]
    fn test_directory_is_not_input() {
        let temp = TempDir::new().unwrap();
        let input = InputFile::new(temp.path().to_path_buf());

        assert!(matches!(input.read(), Err(InputError::Io { .. })));
    }
}

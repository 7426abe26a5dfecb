//! Output files written next to their targets and moved into place together.
//!
//! Each target gets a temporary file in its own directory. Nothing reaches
//! a target path until [`StagedOutputs::commit`]; dropping the set without
//! committing removes every temporary file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

#[derive(Default)]
pub struct StagedOutputs {
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a temporary file for `target` and return the path to write.
    pub fn stage(&mut self, target: &Path) -> Result<PathBuf> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file = NamedTempFile::new_in(dir)
            .with_context(|| format!("create temporary file for {}", target.display()))?;
        let path = file.path().to_path_buf();
        self.staged.push((file, target.to_path_buf()));
        Ok(path)
    }

    /// Move every staged file onto its target.
    pub fn commit(self) -> Result<()> {
        for (file, target) in self.staged {
            file.persist(&target)
                .map_err(|err| err.error)
                .with_context(|| format!("move output into {}", target.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn commit_moves_files_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        let mut outputs = StagedOutputs::new();
        fs::write(outputs.stage(&first).unwrap(), "a").unwrap();
        fs::write(outputs.stage(&second).unwrap(), "b").unwrap();
        assert!(!first.exists());

        outputs.commit().unwrap();
        assert_eq!(fs::read_to_string(&first).unwrap(), "a");
        assert_eq!(fs::read_to_string(&second).unwrap(), "b");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn dropping_without_commit_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.csv");
        {
            let mut outputs = StagedOutputs::new();
            fs::write(outputs.stage(&target).unwrap(), "a").unwrap();
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_fails_at_staging() {
        let dir = tempfile::tempdir().unwrap();
        let mut outputs = StagedOutputs::new();
        let err = outputs.stage(&dir.path().join("absent").join("a.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("a.csv"));
    }
}

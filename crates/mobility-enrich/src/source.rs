//! Collaborator traits and their on-disk cached implementations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{EnrichError, Result};
use crate::payload::{AuthorProfile, ThesisCandidate, parse_candidates};

/// Cache subdirectory holding directory records.
pub const AUTHORS_DIR: &str = "authors";
/// Cache subdirectory holding registry search results.
pub const THESES_DIR: &str = "theses";

/// Resolves author identifiers to profiles.
pub trait AuthorDirectory {
    /// `Ok(None)` when the directory knows nothing about the author.
    fn lookup(&self, author_id: &str) -> Result<Option<AuthorProfile>>;
}

/// A thesis registry search for one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesisQuery {
    pub author_id: String,
    pub display_name: String,
}

/// Searches a thesis registry by author name.
pub trait ThesisRegistry {
    /// `Ok(None)` when no search result is available for the query;
    /// `Ok(Some(vec![]))` when the search ran and found nobody.
    fn search(&self, query: &ThesisQuery) -> Result<Option<Vec<ThesisCandidate>>>;
}

/// Directory backed by `<root>/authors/<author_id>.json` files.
#[derive(Debug, Clone)]
pub struct CachedDirectory {
    root: PathBuf,
}

impl CachedDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AuthorDirectory for CachedDirectory {
    fn lookup(&self, author_id: &str) -> Result<Option<AuthorProfile>> {
        let Some(path) = cache_path(&self.root, AUTHORS_DIR, author_id) else {
            return Ok(None);
        };
        let Some(bytes) = read_cached(&path)? else {
            return Ok(None);
        };
        AuthorProfile::from_json(author_id, &bytes)
            .map(Some)
            .map_err(|source| EnrichError::Json { path, source })
    }
}

/// Registry backed by `<root>/theses/<author_id>.json` files.
#[derive(Debug, Clone)]
pub struct CachedThesisRegistry {
    root: PathBuf,
}

impl CachedThesisRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ThesisRegistry for CachedThesisRegistry {
    fn search(&self, query: &ThesisQuery) -> Result<Option<Vec<ThesisCandidate>>> {
        let Some(path) = cache_path(&self.root, THESES_DIR, &query.author_id) else {
            return Ok(None);
        };
        let Some(bytes) = read_cached(&path)? else {
            return Ok(None);
        };
        parse_candidates(&bytes)
            .map(Some)
            .map_err(|source| EnrichError::Json { path, source })
    }
}

/// Cache file for `author_id`, or `None` if the id is not a plain file name.
fn cache_path(root: &Path, kind: &str, author_id: &str) -> Option<PathBuf> {
    let plain = !author_id.is_empty()
        && author_id != "."
        && author_id != ".."
        && !author_id.contains(['/', '\\']);
    plain.then(|| root.join(kind).join(format!("{author_id}.json")))
}

fn read_cached(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            trace!(path = %path.display(), "no cached payload");
            Ok(None)
        }
        Err(source) => Err(EnrichError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

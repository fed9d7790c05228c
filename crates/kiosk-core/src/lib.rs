//! kiosk-core: post catalog types, the catalog source seam, and the pure
//! browsing state (grid pager, search filter, hero rotation, share links).

pub mod debounce;
pub mod grid;
pub mod hero;
pub mod progress;
pub mod search;
pub mod share;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One post record as produced by the site generator. The catalog is
/// read-only after load; received order is display order, and index 0 is
/// the featured item on listing views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub category: String,
    pub short_desc: String,
    pub description: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog at {path} is not a JSON post array: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where post summaries come from. Loaded once per session; every feature
/// that depends on the catalog must tolerate the load failing and stay
/// inert until data arrives.
pub trait Source {
    fn load(&self) -> Result<Vec<PostSummary>, CatalogError>;
}

/// One-shot read of a JSON post array, the layout the site generator
/// writes to `assets/data/posts.json`.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for JsonFileSource {
    fn load(&self) -> Result<Vec<PostSummary>, CatalogError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// The featured item on listing views.
pub fn hero_post(posts: &[PostSummary]) -> Option<&PostSummary> {
    posts.first()
}

/// The grid-eligible slice of a catalog: everything except the hero item.
pub fn grid_items(posts: &[PostSummary]) -> &[PostSummary] {
    if posts.is_empty() {
        posts
    } else {
        &posts[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> PostSummary {
        PostSummary {
            title: title.into(),
            category: "Red Team".into(),
            short_desc: String::new(),
            description: String::new(),
            date: "2025-11-02".into(),
            url: format!("posts/{}.html", title),
        }
    }

    #[test]
    fn json_file_source_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let posts = vec![post("alpha"), post("beta")];
        std::fs::write(&path, serde_json::to_vec(&posts).unwrap()).unwrap();
        let loaded = JsonFileSource::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "alpha");
    }

    #[test]
    fn missing_catalog_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("nope.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, b"{\"not\": \"an array\"}").unwrap();
        let err = JsonFileSource::new(&path).load().unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn hero_and_grid_split() {
        let posts = vec![post("hero"), post("a"), post("b")];
        assert_eq!(hero_post(&posts).unwrap().title, "hero");
        assert_eq!(grid_items(&posts).len(), 2);
        assert_eq!(grid_items(&posts)[0].title, "a");

        let empty: Vec<PostSummary> = Vec::new();
        assert!(hero_post(&empty).is_none());
        assert!(grid_items(&empty).is_empty());
    }
}

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

static UNSAFE_NAME_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid file name regex"));

const FALLBACK_FILE_NAME: &str = "image";
const MAX_FILE_NAME_CHARS: usize = 100;

/// Flat directory of archived image files.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes `bytes` to a fresh file derived from `name` and returns its path.
    ///
    /// A random prefix keeps repeated uploads of the same name apart.
    pub fn write(&self, bytes: &[u8], name: &str) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self
            .root
            .join(format!("{}-{}", Uuid::new_v4(), sanitize_file_name(name)));
        fs::write(&path, bytes)?;
        debug!(
            "event=image_write module=archive status=ok bytes={} path={}",
            bytes.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn read(&self, path: impl AsRef<Path>) -> std::io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Best-effort cleanup for a file whose row never got committed.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let _ = fs::remove_file(path);
    }
}

/// Reduces an uploader-supplied name to a single safe path component.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced = UNSAFE_NAME_CHARS_RE.replace_all(name.trim(), "_");
    let trimmed = replaced.trim_start_matches('.');
    if trimmed.is_empty() {
        return FALLBACK_FILE_NAME.to_string();
    }
    trimmed.chars().take(MAX_FILE_NAME_CHARS).collect()
}

//! Read-only view of a file eligible for serving.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use crate::http::mime::FileType;
use crate::http::response::Status;

/// Why a requested path cannot be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    /// The path does not name a regular file.
    NotAFile,
    /// The file exists but cannot be opened for reading.
    NotReadable,
}

impl ResourceError {
    /// Status code reported to the client.
    pub fn status(self) -> Status {
        match self {
            ResourceError::NotAFile => Status::MethodNotAllowed,
            ResourceError::NotReadable => Status::Forbidden,
        }
    }

    /// Explanatory text body reported to the client.
    pub fn message(self) -> &'static str {
        match self {
            ResourceError::NotAFile => "resource not a file",
            ResourceError::NotReadable => "resource not readable",
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Metadata snapshot of a file about to be served.
///
/// Taken fresh for every request; nothing is cached across connections.
#[derive(Debug, Clone)]
pub struct FileResource {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// File length in bytes.
    pub len: u64,
    /// Last-modified time, milliseconds since the epoch (0 when unavailable).
    pub mtime_millis: u64,
    /// Media type derived from the request path's extension.
    pub file_type: FileType,
}

impl FileResource {
    /// Inspect `path` and verify it names a regular, readable file.
    pub async fn open(path: &str, file_type: FileType) -> Result<Self, ResourceError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|_| ResourceError::NotAFile)?;
        if !meta.is_file() {
            return Err(ResourceError::NotAFile);
        }

        // a metadata check alone won't catch permission problems
        tokio::fs::File::open(path)
            .await
            .map_err(|_| ResourceError::NotReadable)?;

        let mtime_millis = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_millis() as u64);

        let path = tokio::fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| PathBuf::from(path));

        Ok(Self {
            path,
            len: meta.len(),
            mtime_millis,
            file_type,
        })
    }

    /// Content-Type header value for this file.
    pub fn content_type(&self) -> &'static str {
        self.file_type.content_type()
    }

    /// Cache-validation token derived from path, mtime and length.
    ///
    /// A cheap hex digest meant as a client-side caching hint, nothing more.
    pub fn etag(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.path.hash(&mut hasher);
        self.mtime_millis.hash(&mut hasher);
        self.len.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etag_is_deterministic() {
        let resource = FileResource {
            path: PathBuf::from("/media/clip.mp4"),
            len: 1234,
            mtime_millis: 1_700_000_000_000,
            file_type: FileType::Mp4,
        };
        assert_eq!(resource.etag(), resource.etag());

        let mut touched = resource.clone();
        touched.mtime_millis += 1;
        assert_ne!(resource.etag(), touched.etag());
    }
}

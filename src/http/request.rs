//! Parsed request representation and classification.
//!
//! Requests come in two flavors: MEDIA (a whitelisted file extension, the
//! decoded path is served from the filesystem) and TEXT (anything else,
//! forwarded to the host application's callback and answered with an ACK).
//! An empty path or a trailing slash is answered with server info instead.

use percent_encoding::percent_decode_str;

use crate::http::mime::FileType;

/// A parsed request: method, raw path tail, and the raw header lines in the
/// order they arrived. Lives for one connection.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    /// The method token from the request line (only `GET` is served).
    pub method: String,
    /// The request target with one leading `/` stripped, still URL-encoded.
    pub raw_path: String,
    /// Raw header lines, order preserved, blank terminator excluded.
    pub header_lines: Vec<String>,
}

/// What a request asks the server to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// Empty path or directory-style path: answer with the server-info line.
    ServerInfo,
    /// A whitelisted media file to stream from `path`.
    Media { path: String, file_type: FileType },
    /// A message for the host application; answered with a bare ACK.
    Text(String),
}

impl IncomingRequest {
    /// Decide how this request is handled.
    ///
    /// The server-info check runs on the still-encoded tail; everything else
    /// sees the decoded form. Query strings and unknown extensions are both
    /// TEXT - the path of a TEXT request is a message, not a location.
    pub fn classify(&self) -> RequestKind {
        if self.raw_path.is_empty() || self.raw_path.ends_with('/') {
            return RequestKind::ServerInfo;
        }

        let decoded = url_decode(&self.raw_path);

        if decoded.starts_with('?') {
            return RequestKind::Text(decoded);
        }

        match FileType::from_path(&decoded) {
            Some(file_type) => RequestKind::Media {
                path: decoded,
                file_type,
            },
            None => RequestKind::Text(decoded),
        }
    }
}

/// Form-style URL decoding: `+` means space, then percent-escapes.
///
/// Escapes decoding to invalid UTF-8 are replaced rather than rejected; a
/// garbled path simply fails to resolve to a file later.
fn url_decode(raw: &str) -> String {
    let plus_as_space = raw.replace('+', " ");
    percent_decode_str(&plus_as_space)
        .decode_utf8_lossy()
        .into_owned()
}

//! HTTP status codes and response head construction.

use chrono::Utc;

/// HTTP status codes the server deals in.
///
/// A closed set; each variant carries its literal reason phrase.
/// `NotImplemented` is part of the vocabulary but no handler path currently
/// emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 206 Partial Content
    PartialContent,
    /// 403 Forbidden
    Forbidden,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 416 Requested Range Not Satisfiable
    RangeNotSatisfiable,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl Status {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::PartialContent => 206,
            Status::Forbidden => 403,
            Status::MethodNotAllowed => 405,
            Status::RangeNotSatisfiable => 416,
            Status::InternalServerError => 500,
            Status::NotImplemented => 501,
        }
    }

    /// Returns the literal reason phrase sent on the wire.
    pub fn reason_phrase(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::PartialContent => "Partial Content",
            Status::Forbidden => "Forbidden",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::RangeNotSatisfiable => "Requested Range Not Satisfiable",
            Status::InternalServerError => "Internal Server Error",
            Status::NotImplemented => "Not Implemented",
        }
    }
}

/// Response status line plus ordered headers, ready to serialize.
///
/// Headers are kept in insertion order so responses are byte-stable.
#[derive(Debug)]
pub struct ResponseHead {
    status: Status,
    headers: Vec<(&'static str, String)>,
}

impl ResponseHead {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Serialize the status line, headers, and the blank line separating
    /// headers from the body. CRLF throughout.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        buf.extend_from_slice(
            format!(
                "HTTP/1.1 {} {}\r\n",
                self.status.as_u16(),
                self.status.reason_phrase()
            )
            .as_bytes(),
        );
        for (name, value) in &self.headers {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"\r\n");
        buf
    }
}

/// Current time formatted for the `Date` header, RFC 1123 style in GMT.
///
/// Formatted per call; no shared formatter state, so handlers on different
/// workers can stamp dates without coordination.
pub fn http_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

//! Raw request parsing.
//!
//! A request is the text lines up to the blank line that ends the header
//! block (or up to end-of-stream). Only the request line is interpreted
//! here; header lines are carried through raw for later scanning.

use crate::http::request::IncomingRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The header block has not fully arrived yet.
    Incomplete,
    /// The stream ended before any request line was read.
    Empty,
    /// The request line does not have the `METHOD /path` shape.
    BadRequestLine,
}

/// Try to parse a request out of the bytes buffered so far.
///
/// Returns [`ParseError::Incomplete`] while the terminating blank line has
/// not arrived; pass `eof = true` once the peer has closed its write side to
/// parse whatever lines did arrive.
pub fn parse_request(buf: &[u8], eof: bool) -> Result<IncomingRequest, ParseError> {
    let block = match find_headers_end(buf) {
        Some(end) => &buf[..end],
        None if eof => buf,
        None => return Err(ParseError::Incomplete),
    };

    let text = String::from_utf8_lossy(block);
    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.to_string());
    }

    if lines.is_empty() {
        return Err(ParseError::Empty);
    }

    // request line: `METHOD /?<tail>`, trailing version token ignored
    let request_line = lines[0].trim();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().ok_or(ParseError::BadRequestLine)?;
    let target = parts.next().ok_or(ParseError::BadRequestLine)?;
    let raw_path = target.strip_prefix('/').unwrap_or(target);

    Ok(IncomingRequest {
        method: method.to_string(),
        raw_path: raw_path.to_string(),
        header_lines: lines[1..].to_vec(),
    })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

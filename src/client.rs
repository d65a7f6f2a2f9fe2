//! Bare-bones HTTP GET client.
//!
//! Just enough to exercise the server from tests and scripts: one GET, the
//! whole response read to end-of-stream. Not a general HTTP client.

use anyhow::{Context, Result};
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use url::Url;

/// A fully buffered response.
#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ClientResponse {
    /// First header with the given name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as trimmed text, for the server's plain-text responses.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// GET `url` and buffer the whole response.
pub async fn get(url: &str) -> Result<ClientResponse> {
    get_with_headers(url, &[]).await
}

/// GET `url` with extra request headers (e.g. `Range`).
pub async fn get_with_headers(url: &str, extra: &[(&str, &str)]) -> Result<ClientResponse> {
    let url = Url::parse(url).context("invalid url")?;
    let host = url.host_str().context("url missing host")?;
    let port = url.port_or_known_default().unwrap_or(80);

    let mut stream = TcpStream::connect((host, port))
        .await
        .with_context(|| format!("connect to {host}:{port} failed"))?;

    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut request = format!("GET {target} HTTP/1.1\r\nHost: {host}:{port}\r\n");
    for (name, value) in extra {
        request.push_str(name);
        request.push_str(": ");
        request.push_str(value);
        request.push_str("\r\n");
    }
    request.push_str("Connection: close\r\n\r\n");

    stream
        .write_all(request.as_bytes())
        .await
        .context("send request failed")?;

    let mut raw = BytesMut::with_capacity(8192);
    loop {
        let mut chunk = [0u8; 4096];
        let n = stream.read(&mut chunk).await.context("read response failed")?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
    }

    parse_response(&raw)
}

fn parse_response(raw: &[u8]) -> Result<ClientResponse> {
    let headers_end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .context("malformed response: no header terminator")?;

    let head = std::str::from_utf8(&raw[..headers_end]).context("non-utf8 response head")?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().context("empty response")?;
    let status = status_line
        .split_whitespace()
        .nth(1)
        .context("malformed status line")?
        .parse::<u16>()
        .context("bad status code")?;

    let mut headers = Vec::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    Ok(ClientResponse {
        status,
        headers,
        body: raw[headers_end + 4..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_headers_and_body() {
        let raw = b"HTTP/1.1 206 Partial Content\r\nContent-Length: 3\r\nETag: abc\r\n\r\nxyz";
        let response = parse_response(raw).unwrap();

        assert_eq!(response.status, 206);
        assert_eq!(response.header("content-length"), Some("3"));
        assert_eq!(response.header("ETag"), Some("abc"));
        assert_eq!(response.body, b"xyz");
    }
}

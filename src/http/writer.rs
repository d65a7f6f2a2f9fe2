//! Response serialization and body streaming.

use std::io::SeekFrom;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

use crate::http::range::ByteRange;
use crate::http::resource::FileResource;
use crate::http::response::{http_date, ResponseHead, Status};

/// Copy window for file bodies. Small on purpose; this runs on phones and
/// similarly constrained devices.
const CHUNK_SIZE: usize = 4096;

/// Writes one response to a connection's output stream.
///
/// Generic over the destination so tests can capture the exact bytes.
pub struct ResponseWriter<'a, W> {
    dest: &'a mut W,
    agent: &'a str,
}

impl<'a, W: AsyncWrite + Unpin> ResponseWriter<'a, W> {
    pub fn new(dest: &'a mut W, agent: &'a str) -> Self {
        Self { dest, agent }
    }

    /// Send a plain-text response: headers, the payload, and a trailing
    /// blank line.
    pub async fn send_text(&mut self, status: Status, text: &str) -> anyhow::Result<()> {
        let head = ResponseHead::new(status)
            .header("Server", self.agent)
            .header("Content-Type", "text/plain; charset=utf-8")
            .header("Accept-Ranges", "bytes")
            .header("Date", http_date());

        let mut buf = head.serialize();
        buf.extend_from_slice(text.as_bytes());
        buf.extend_from_slice(b"\r\n\r\n");

        self.dest
            .write_all(&buf)
            .await
            .context("write text response failed")?;
        self.dest.flush().await.context("flush failed")?;
        Ok(())
    }

    /// Stream a file body, honoring a resolved byte range.
    ///
    /// An invalid range must be answered with 416 before getting here; this
    /// only distinguishes full (200) from partial (206) transfers.
    pub async fn send_file(
        &mut self,
        resource: &FileResource,
        range: &ByteRange,
    ) -> anyhow::Result<()> {
        if range.present && range.valid {
            self.send_partial(resource, range).await
        } else {
            self.send_full(resource).await
        }
    }

    async fn send_full(&mut self, resource: &FileResource) -> anyhow::Result<()> {
        let head = ResponseHead::new(Status::Ok)
            .header("Server", self.agent)
            .header("Accept-Ranges", "bytes")
            .header("Content-Type", resource.content_type())
            .header("Content-Length", resource.len.to_string())
            .header("Date", http_date())
            .header("ETag", resource.etag())
            .header("Connection", "close");

        self.dest
            .write_all(&head.serialize())
            .await
            .context("write response head failed")?;
        self.dest.flush().await.context("flush failed")?;

        let mut file = File::open(&resource.path)
            .await
            .with_context(|| format!("open {} failed", resource.path.display()))?;
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = file.read(&mut buf).await.context("file read failed")?;
            if n == 0 {
                break;
            }
            self.dest
                .write_all(&buf[..n])
                .await
                .context("write body failed")?;
        }
        self.dest.flush().await.context("flush failed")?;
        Ok(())
    }

    async fn send_partial(
        &mut self,
        resource: &FileResource,
        range: &ByteRange,
    ) -> anyhow::Result<()> {
        let size = range.size();
        let head = ResponseHead::new(Status::PartialContent)
            .header("Server", self.agent)
            .header("Accept-Ranges", "bytes")
            .header("Content-Type", resource.content_type())
            .header("Date", http_date())
            .header("ETag", resource.etag())
            .header(
                "Content-Range",
                format!("bytes {}-{}/{}", range.start, range.end, resource.len),
            )
            .header("Content-Length", size.to_string())
            .header("Connection", "close");

        self.dest
            .write_all(&head.serialize())
            .await
            .context("write response head failed")?;
        self.dest.flush().await.context("flush failed")?;

        let mut file = File::open(&resource.path)
            .await
            .with_context(|| format!("open {} failed", resource.path.display()))?;
        file.seek(SeekFrom::Start(range.start as u64))
            .await
            .context("seek to range start failed")?;

        // the range end may point past the file; the transfer simply stops
        // at end-of-file in that case
        let mut remaining = size as u64;
        let mut buf = [0u8; CHUNK_SIZE];
        while remaining > 0 {
            let want = remaining.min(CHUNK_SIZE as u64) as usize;
            let n = file.read(&mut buf[..want]).await.context("file read failed")?;
            if n == 0 {
                break;
            }
            self.dest
                .write_all(&buf[..n])
                .await
                .context("write body failed")?;
            remaining -= n as u64;
        }
        self.dest.flush().await.context("flush failed")?;
        Ok(())
    }
}

//! Per-connection request handler.
//!
//! One instance per accepted socket, for exactly one request/response cycle:
//! read the header block, classify, respond, close. There is no keep-alive;
//! the socket is shut down on every exit path.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::http::mime::FileType;
use crate::http::parser::{self, ParseError};
use crate::http::range;
use crate::http::request::{IncomingRequest, RequestKind};
use crate::http::resource::FileResource;
use crate::http::response::Status;
use crate::http::writer::ResponseWriter;
use crate::notify::SharedCallback;

pub struct Connection {
    stream: TcpStream,
    buffer: Vec<u8>,
    config: Arc<Config>,
    callback: Option<SharedCallback>,
}

impl Connection {
    pub fn new(stream: TcpStream, config: Arc<Config>, callback: Option<SharedCallback>) -> Self {
        Self {
            stream,
            buffer: Vec::with_capacity(4096),
            config,
            callback,
        }
    }

    /// Handle the connection's single request, then shut the socket down.
    ///
    /// Transport failures are returned (after a best-effort 500 text
    /// response) so the listener can log them; nothing here ends the
    /// process.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let started = Instant::now();
        let result = self.handle().await;

        if let Err(err) = &result {
            let agent = self.config.server_agent.clone();
            let mut writer = ResponseWriter::new(&mut self.stream, &agent);
            let _ = writer
                .send_text(
                    Status::InternalServerError,
                    &format!("ERROR handling request: {err}"),
                )
                .await;
        }

        let _ = self.stream.shutdown().await;
        debug!(
            duration_ms = started.elapsed().as_millis() as u64,
            "connection closed"
        );
        result
    }

    async fn handle(&mut self) -> anyhow::Result<()> {
        let request = match self.read_request().await? {
            Ok(request) => request,
            Err(err) => {
                warn!(?err, "client request could not be parsed");
                return self.send_text(Status::MethodNotAllowed, "not allowed").await;
            }
        };

        if self.config.debug {
            debug!(method = %request.method, path = %request.raw_path, "request line");
            for line in &request.header_lines {
                debug!(header = %line, "request header");
            }
        }

        if request.method != "GET" {
            warn!(method = %request.method, "client made request that was not allowed");
            return self.send_text(Status::MethodNotAllowed, "not allowed").await;
        }

        match request.classify() {
            RequestKind::ServerInfo => {
                let body = format!(
                    "{} (AndroidModel:{} AndroidVersion:{})",
                    self.config.server_agent, self.config.device_model, self.config.device_version
                );
                self.send_text(Status::Ok, &body).await
            }
            RequestKind::Text(text) => self.handle_text(&text).await,
            RequestKind::Media { path, file_type } => {
                self.handle_media(&path, file_type, &request).await
            }
        }
    }

    /// Accumulate bytes until the header block terminator (or EOF) and parse.
    ///
    /// The outer `Result` is transport failure; the inner one is a protocol
    /// error the caller answers with a 405.
    async fn read_request(
        &mut self,
    ) -> anyhow::Result<Result<IncomingRequest, ParseError>> {
        loop {
            match parser::parse_request(&self.buffer, false) {
                Ok(request) => return Ok(Ok(request)),
                Err(ParseError::Incomplete) => {}
                Err(err) => return Ok(Err(err)),
            }

            let mut chunk = [0u8; 1024];
            let n = self
                .stream
                .read(&mut chunk)
                .await
                .context("read from client failed")?;
            if n == 0 {
                // peer closed its write side; parse whatever arrived
                return Ok(parser::parse_request(&self.buffer, true));
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    async fn handle_text(&mut self, text: &str) -> anyhow::Result<()> {
        if let Some(callback) = &self.callback {
            if let Err(err) = callback.on_request(text) {
                // the notification is best-effort; the client still gets its ACK
                error!(error = %err, "text request callback failed");
            }
        }
        self.send_text(Status::Ok, "ACK").await
    }

    async fn handle_media(
        &mut self,
        path: &str,
        file_type: FileType,
        request: &IncomingRequest,
    ) -> anyhow::Result<()> {
        let resource = match FileResource::open(path, file_type).await {
            Ok(resource) => resource,
            Err(err) => {
                error!(path, error = %err, "resource cannot be served");
                return self.send_text(err.status(), err.message()).await;
            }
        };

        let range = range::resolve(
            range::parse_range_lines(&request.header_lines),
            resource.len as i64,
        );
        if range.present && !range.valid {
            return self
                .send_text(Status::RangeNotSatisfiable, "range supplied is invalid")
                .await;
        }

        debug!(
            path = %resource.path.display(),
            len = resource.len,
            partial = range.present,
            "serving file"
        );

        let mut writer = ResponseWriter::new(&mut self.stream, &self.config.server_agent);
        if let Err(err) = writer.send_file(&resource, &range).await {
            // expected when the client drops the connection mid-transfer
            warn!(error = %err, "file transfer ended early");
        }
        Ok(())
    }

    async fn send_text(&mut self, status: Status, text: &str) -> anyhow::Result<()> {
        ResponseWriter::new(&mut self.stream, &self.config.server_agent)
            .send_text(status, text)
            .await
    }
}

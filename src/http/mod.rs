//! HTTP protocol implementation.
//!
//! A deliberately small slice of HTTP/1.1: GET only, one request per
//! connection, byte-range support for streaming media.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection handler driving one request/response cycle
//! - **`parser`**: reads the raw header block and extracts the request line
//! - **`request`**: request representation and MEDIA/TEXT classification
//! - **`range`**: `Range` header parsing and resolution against the file
//! - **`resource`**: metadata snapshot of the file being served
//! - **`response`**: status codes and response head construction
//! - **`writer`**: serializes heads and streams text or file bodies
//! - **`mime`**: supported file types and Content-Type lookup
//!
//! # Request flow
//!
//! ```text
//!  accept → parse header block → GET?
//!             ├─ no  → 405
//!             └─ yes → classify path
//!                  ├─ empty / trailing "/" → 200 server info
//!                  ├─ TEXT  → fire callback, 200 "ACK"
//!                  └─ MEDIA → resolve file + range
//!                       ├─ not a file / unreadable → 405 / 403
//!                       ├─ invalid range           → 416
//!                       ├─ valid range             → 206 partial body
//!                       └─ no range                → 200 full body
//!  ... and the socket closes after every response.
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod range;
pub mod request;
pub mod resource;
pub mod response;
pub mod writer;

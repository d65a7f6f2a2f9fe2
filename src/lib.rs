//! Courier - embedded media/text HTTP server
//!
//! Serves device files over HTTP (GET only, with Partial Content support)
//! and accepts one-way text notifications over the same socket.

pub mod client;
pub mod config;
pub mod http;
pub mod notify;
pub mod server;

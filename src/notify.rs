//! Text request notification callback.
//!
//! TEXT-classified requests carry no file path; they exist purely so a
//! client can push a message to the host application over the server's
//! socket. The host supplies a callback at construction time and receives
//! each message; the HTTP response is always a bare ACK.

use std::sync::Arc;

/// Callback fired once per TEXT-classified request with the decoded request
/// string.
///
/// Handlers run on a pool of worker tasks, so the callback may be invoked
/// concurrently with no ordering guarantee across requests; implementations
/// that need ordering or exclusivity must synchronize internally. A returned
/// error is logged and otherwise ignored - the client still receives the ACK.
pub trait TextRequestCallback: Send + Sync {
    fn on_request(&self, request: &str) -> anyhow::Result<()>;
}

impl<F> TextRequestCallback for F
where
    F: Fn(&str) -> anyhow::Result<()> + Send + Sync,
{
    fn on_request(&self, request: &str) -> anyhow::Result<()> {
        self(request)
    }
}

/// Shared, clonable callback handle passed down to connection handlers.
pub type SharedCallback = Arc<dyn TextRequestCallback>;

//! Tracy profiler integration.
//!
//! With the `tracy` feature, every frame boundary is forwarded to a running
//! Tracy client so the in-process history lines up with Tracy's timeline.
//! Without a running client this is a no-op.

/// Mark a frame boundary in Tracy.
#[inline]
pub fn frame_mark() {
    #[cfg(feature = "tracy")]
    if let Some(client) = tracy_client::Client::running() {
        client.frame_mark();
    }
}

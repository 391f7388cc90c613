use thiserror::Error;

/// Errors returned by [`crate::stream::engine::LogEngine`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// A chunk arrived after the stream was finished.
    #[error("cannot ingest {chunk_len} bytes: stream already finished")]
    Finished { chunk_len: usize },
}

use thiserror::Error;

/// Fatal pipeline failures. Anything short of an unframeable byte stream is
/// handled by skipping the offending record, never by returning an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid transaction batch: {0}")]
    InvalidBatch(#[from] prost::DecodeError),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid maximum message delay: {0} (must be >= 1)")]
    InvalidMaxDelay(u32),
}

pub type TransportResult<T> = Result<T, TransportError>;

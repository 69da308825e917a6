use ring_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("ring configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type RingResult<T> = Result<T, RingError>;

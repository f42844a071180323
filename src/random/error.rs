use rand::distr::weighted;
use rand_distr::NormalError;
use thiserror::Error;

/// Precondition violations of the sampling operations.
///
/// The `try_*` operations return these; the plain operations panic with the
/// same message, as they treat a violation as a programming error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RandomError {
    #[error("cannot pick an element from an empty collection")]
    EmptyCollection,
    #[error("selected offset {offset} is out of range for a collection of {len} elements")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("invalid selection weights: {0}")]
    InvalidWeights(#[from] weighted::Error),
    #[error("invalid normal distribution parameters: {0}")]
    InvalidNormal(#[from] NormalError),
    #[error("server random generator used before a server seed was installed")]
    ServerUnseeded,
}

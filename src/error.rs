/// Error kinds surfaced by the engine.
///
/// Validation and configuration errors abort before any kernel runs.
/// `NonPhysical` is fatal: the engine does not roll back cell-by-cell, it
/// logs the offending iteration/time and aborts, preserving the last
/// known-good `State` for the caller to checkpoint. `IO` and `Interrupt`
/// terminate the outer loop cleanly. Nothing here is silently retried.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("non-physical state at iteration {iteration}, t={time}: {detail}")]
    NonPhysical {
        iteration: u64,
        time: f64,
        detail: String,
    },

    #[error("invalid boundary policy: {0}")]
    BoundaryPolicyInvalid(String),

    #[error("{0}")]
    IO(#[from] std::io::Error),

    #[error("interrupted")]
    Interrupt,
}

pub type Result<T> = std::result::Result<T, Error>;

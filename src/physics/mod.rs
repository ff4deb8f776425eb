pub mod euler;
pub mod srhd;

/// Cardinal grid axis a flux or reconstruction is evaluated along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Failure of a primitive/conserved conversion: density or pressure came
/// out non-positive. Carries no iteration/time context of its own — the
/// solver driver attaches that when it turns this into an `error::Error`.
#[derive(Debug, Clone)]
pub struct NonPhysical(pub String);

impl std::fmt::Display for NonPhysical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type PResult<T> = std::result::Result<T, NonPhysical>;

/// The default gamma-law index used unless a configuration overrides it.
pub const DEFAULT_GAMMA: f64 = 5.0 / 3.0;

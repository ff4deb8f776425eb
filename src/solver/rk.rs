//! Shu-Osher strong-stability-preserving Runge-Kutta stage tables.

/// Time integration scheme. `Fwd` and `Rk1` are numerically identical
/// (single stage, blend coefficient `0.0`) but `Fwd` never allocates the
/// `urk` snapshot buffer the blending stages need, so it stays the cheap
/// path for forward-Euler runs rather than being folded into `Rk1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeIntegration {
    Fwd,
    Rk1,
    Rk2,
    Rk3,
}

impl TimeIntegration {
    /// Shu-Osher blend coefficients `alpha` for each stage: the updated
    /// conserved state is blended as `u = u*(1-alpha) + urk*alpha` after
    /// each stage's flux-divergence update, where `urk` is the state at the
    /// start of the step.
    pub fn stages(&self) -> &'static [f64] {
        match self {
            TimeIntegration::Fwd => &[0.0],
            TimeIntegration::Rk1 => &[0.0],
            TimeIntegration::Rk2 => &[0.0, 0.5],
            TimeIntegration::Rk3 => &[0.0, 0.75, 1.0 / 3.0],
        }
    }

    /// Whether this scheme needs a snapshot of the pre-step state to blend
    /// toward between stages.
    pub fn needs_snapshot(&self) -> bool {
        !matches!(self, TimeIntegration::Fwd)
    }
}

//! Kernel selection: picks the fluxing/reconstruction/dimension combination
//! once, at solver construction, rather than branching on it inside the
//! per-cell hot loop.

use crate::error::{Error, Result};
use crate::godunov::Reconstruction;
use crate::solver::rk::TimeIntegration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fluxing {
    PerFace,
    PerZone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Dimension {
    One,
    Two,
}

/// A validated, fully-resolved solver configuration. Building one is the
/// only place `UnsupportedConfiguration` is raised; everything downstream
/// treats the combination as known-good.
#[derive(Clone, Copy, Debug)]
pub struct SolverKind {
    pub dimension: Dimension,
    pub fluxing: Fluxing,
    pub reconstruction: Reconstruction,
    pub time_integration: TimeIntegration,
}

impl SolverKind {
    pub fn select(
        dimension: Dimension,
        fluxing: Fluxing,
        reconstruction: Reconstruction,
        time_integration: TimeIntegration,
    ) -> Result<Self> {
        if dimension == Dimension::Two && fluxing == Fluxing::PerFace {
            return Err(Error::UnsupportedConfiguration(
                "per-face fluxing is only implemented in 1D; use per_zone in 2D".into(),
            ));
        }
        Ok(Self {
            dimension,
            fluxing,
            reconstruction,
            time_integration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_face_is_rejected_in_2d() {
        let r = SolverKind::select(
            Dimension::Two,
            Fluxing::PerFace,
            Reconstruction::Pcm,
            TimeIntegration::Fwd,
        );
        assert!(r.is_err());
    }

    #[test]
    fn per_zone_is_accepted_in_either_dimension() {
        assert!(SolverKind::select(Dimension::One, Fluxing::PerZone, Reconstruction::Pcm, TimeIntegration::Fwd).is_ok());
        assert!(SolverKind::select(Dimension::Two, Fluxing::PerZone, Reconstruction::Pcm, TimeIntegration::Fwd).is_ok());
    }
}

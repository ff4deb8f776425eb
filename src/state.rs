//! Solution state snapshots, checkpointed and reported on. Mirrors the
//! teacher's `AnyState` enum-dispatch: one variant per physics system, so
//! the checkpoint format and the progress reporter don't need to know
//! which system produced a given run.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::numeric::Vector;

#[derive(Clone, Serialize, Deserialize)]
pub enum AnyPrimitive {
    Euler1D(Array1<Vector<3>>),
    Euler2D(Array2<Vector<4>>),
    Srhd1D(Vec<Array1<Vector<4>>>),
}

impl AnyPrimitive {
    pub fn num_zones(&self) -> usize {
        match self {
            AnyPrimitive::Euler1D(p) => p.len(),
            AnyPrimitive::Euler2D(p) => p.len(),
            AnyPrimitive::Srhd1D(patches) => patches.iter().map(|p| p.len()).sum(),
        }
    }
}

/// A point-in-time snapshot of a running solver: enough to report
/// progress, write a checkpoint, or resume a run.
#[derive(Clone, Serialize, Deserialize)]
pub struct State {
    pub iteration: u64,
    pub time: f64,
    pub primitive: AnyPrimitive,
    pub total_zones: usize,
}

impl State {
    pub fn new(iteration: u64, time: f64, primitive: AnyPrimitive) -> Self {
        let total_zones = primitive.num_zones();
        Self {
            iteration,
            time,
            primitive,
            total_zones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_zones_matches_the_buffer_length() {
        let primitive = AnyPrimitive::Euler1D(Array1::from_elem(20, Vector([1.0, 0.0, 1.0])));
        let state = State::new(0, 0.0, primitive);
        assert_eq!(state.total_zones, 20);
    }
}

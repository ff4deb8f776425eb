pub mod driver;
pub mod kernel;
pub mod patch;
pub mod per_face;
pub mod per_zone;
pub mod rk;

pub use kernel::{Dimension, Fluxing, SolverKind};
pub use rk::TimeIntegration;

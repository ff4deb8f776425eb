//! Built-in initial conditions, ported directly from `linear_shocktube`
//! and `cylindrical_shocktube` in `sailfish0.6.py`.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mesh::{Mesh1D, Mesh2D};
use crate::numeric::Vector;
use crate::solver::per_zone::NG;

#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum InitialData {
    /// Sod-type shocktube: `(1.0, 0.0, 1.0)` for `x < 0.5`, `(0.1, 0.0, 0.125)`
    /// otherwise.
    Shocktube,
    /// A circular high-pressure region of the given radius centered on the
    /// origin, `(1.0, 0.0, 0.0, 1.0)` inside and `(0.1, 0.0, 0.0, 0.125)`
    /// outside.
    CylindricalShocktube { radius: f64, pressure: f64 },
}

impl Default for InitialData {
    fn default() -> Self {
        InitialData::Shocktube
    }
}

impl InitialData {
    /// Which mesh dimensionality this initial condition is defined for.
    pub fn dimension(&self) -> usize {
        match self {
            InitialData::Shocktube => 1,
            InitialData::CylindricalShocktube { .. } => 2,
        }
    }

    /// Fills the interior `[NG, NG + num_zones)` from the physical profile
    /// and seeds the guard zones by clamping to the nearest interior cell;
    /// the driver overwrites them with the real boundary condition before
    /// the first step.
    pub fn primitive_1d(&self, mesh: &Mesh1D) -> Result<Array1<Vector<3>>> {
        match self {
            InitialData::Shocktube => Ok(Array1::from_shape_fn(mesh.num_zones + 2 * NG, |idx| {
                let i = idx.saturating_sub(NG).min(mesh.num_zones - 1);
                let x = mesh.cell_center(i);
                if x < 0.5 {
                    Vector([1.0, 0.0, 1.000])
                } else {
                    Vector([0.1, 0.0, 0.125])
                }
            })),
            InitialData::CylindricalShocktube { .. } => Err(Error::InvalidConfiguration(
                "cylindrical_shocktube is a 2D initial condition, but the mesh is 1D".into(),
            )),
        }
    }

    pub fn primitive_2d(&self, mesh: &Mesh2D) -> Result<Array2<Vector<4>>> {
        match self {
            InitialData::CylindricalShocktube { radius, pressure } => {
                Ok(Array2::from_shape_fn((mesh.ni + 2 * NG, mesh.nj + 2 * NG), |(idx, jdx)| {
                    let i = idx.saturating_sub(NG).min(mesh.ni - 1);
                    let j = jdx.saturating_sub(NG).min(mesh.nj - 1);
                    let (x, y) = mesh.cell_center(i, j);
                    if (x * x + y * y).sqrt() < *radius {
                        Vector([1.000, 0.0, 0.0, *pressure])
                    } else {
                        Vector([0.100, 0.0, 0.0, 0.125])
                    }
                }))
            }
            InitialData::Shocktube => Err(Error::InvalidConfiguration(
                "shocktube is a 1D initial condition, but the mesh is 2D".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shocktube_splits_at_the_midpoint() {
        let mesh = Mesh1D::new(10);
        let p = InitialData::Shocktube.primitive_1d(&mesh).unwrap();
        assert_eq!(p.len(), 10 + 2 * NG);
        assert_eq!(p[NG].0[0], 1.0);
        assert_eq!(p[NG + 9].0[0], 0.1);
    }

    #[test]
    fn cylindrical_shocktube_is_radially_symmetric() {
        let mesh = Mesh2D::centered_square(16, 0, 1);
        let id = InitialData::CylindricalShocktube {
            radius: 0.1,
            pressure: 1.0,
        };
        let p = id.primitive_2d(&mesh).unwrap();
        let center = mesh.ni / 2 + NG;
        assert_eq!(p[[center, center]].0[0], 1.0);
        assert_eq!(p[[NG, NG]].0[0], 0.1);
    }

    #[test]
    fn mismatched_dimension_is_a_clean_error_not_a_panic() {
        let mesh1 = Mesh1D::new(10);
        assert!(InitialData::CylindricalShocktube { radius: 0.1, pressure: 1.0 }
            .primitive_1d(&mesh1)
            .is_err());

        let mesh2 = Mesh2D::centered_square(8, 0, 1);
        assert!(InitialData::Shocktube.primitive_2d(&mesh2).is_err());
    }
}

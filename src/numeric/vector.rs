use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// A fixed-size bag of `N` floats supporting the componentwise vector-space
/// operations every primitive/conserved cell type needs: `+`, `-`, scaling
/// by a scalar, and division by a scalar. Reconstruction, RK blending, and
/// flux-divergence updates are all expressed in terms of these four
/// operations, so any `NQ`-wide cell type (Euler 1D/2D, SRHD 1D) gets them
/// for free by wrapping a `Vector<NQ>`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector<const N: usize>(pub [f64; N]);

impl<const N: usize> Vector<N> {
    pub fn zeros() -> Self {
        Self([0.0; N])
    }

    pub fn from_fn<F: FnMut(usize) -> f64>(f: F) -> Self {
        let mut f = f;
        let mut out = [0.0; N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = f(i);
        }
        Self(out)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.0[i] + rhs.0[i])
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.0[i] - rhs.0[i])
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::from_fn(|i| self.0[i] * s)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;
    fn div(self, s: f64) -> Self {
        Self::from_fn(|i| self.0[i] / s)
    }
}

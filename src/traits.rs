use std::ops::{Add, Div, Mul, Sub};




// ============================================================================
pub trait Arithmetic:
    Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> + Div<f64, Output = Self> + Sized + Copy
{
}




// ============================================================================
pub trait Zeros {
    fn zeros() -> Self;
}




// ============================================================================
pub trait Conserved: 'static + Clone + Copy + Send + Sync + std::fmt::Debug + Zeros + Arithmetic {
    /// The density that must stay non-negative at every valid interior cell
    /// (lab-frame density for SRHD).
    fn density(&self) -> f64;
}




// ============================================================================
pub trait Primitive: Clone + Copy + Send + Sync + std::fmt::Debug {
    fn mass_density(&self) -> f64;
    fn gas_pressure(&self) -> f64;
}

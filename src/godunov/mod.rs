pub mod minmod;
pub mod reconstruct;

pub use minmod::plm_gradient;
pub use reconstruct::Reconstruction;

pub mod legendre;
pub mod normalisation;
pub mod potential;

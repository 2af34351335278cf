pub mod coefficients;
pub mod field;
pub mod wmm;

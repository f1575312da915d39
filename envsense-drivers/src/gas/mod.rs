//! Gas sensor drivers

pub mod ccs811;

pub use ccs811::{Ccs811, ResultBlock};

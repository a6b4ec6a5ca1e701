//! Core value types: grid geometry and randomness.

pub mod geometry;
pub mod random;

//! Parameters for supporting primitives

pub mod hash;

// src/utils/mod.rs

pub mod random;

pub use random::RandomSource;

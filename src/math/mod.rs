//! Mathematical utilities for the algorithm

/// Seed hashing and the deterministic random stream
pub mod random;

//! Repository layout checks
//!
//! Keeps the mirrored `tests/unit` tree in step with `src`.
